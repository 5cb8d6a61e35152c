//! SQLite-backed station catalog.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use geo::{Coord, Rect};
use log::info;
use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::{FuelStation, InvalidInputError};

use super::{IndexedStationStore, StationStore, StoreError};

const SELECT_STATIONS: &str = "SELECT opis_id, name, city, state, retail_price, latitude, longitude \
     FROM fuel_stations";

/// Error raised when loading the station catalog from SQLite.
#[derive(Debug, Error)]
pub enum SqliteStationStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A row did not describe a valid station.
    #[error("fuel station {id} in the database is invalid: {source}")]
    InvalidStation {
        /// OPIS identifier of the offending row.
        id: u64,
        /// Validation failure.
        #[source]
        source: InvalidInputError,
    },
    /// Generic SQLite error when reading station rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only station store loaded from a `fuel_stations` table.
///
/// Rows are validated and indexed once at [`SqliteStationStore::open`];
/// later queries never touch the database.
pub struct SqliteStationStore {
    path: PathBuf,
    inner: IndexedStationStore,
}

impl fmt::Debug for SqliteStationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStationStore")
            .field("path", &self.path)
            .field("entries", &self.inner.len())
            .finish()
    }
}

impl SqliteStationStore {
    /// Open the catalog stored at `database_path`.
    ///
    /// # Errors
    /// Returns [`SqliteStationStoreError`] when the file cannot be opened,
    /// the table is missing or a row fails validation.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteStationStoreError>
    where
        P: AsRef<Path>,
    {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteStationStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;

        let stations = load_stations(&connection)?;
        info!(
            "loaded {} fuel stations from {}",
            stations.len(),
            database_path.display()
        );

        Ok(Self {
            path: database_path.to_path_buf(),
            inner: IndexedStationStore::new(stations),
        })
    }

    /// Number of stations loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl StationStore for SqliteStationStore {
    fn stations_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError> {
        self.inner.stations_in_bbox(bbox)
    }

    fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError> {
        self.inner.all_stations()
    }
}

struct StationRow {
    id: u64,
    name: String,
    city: String,
    state: String,
    price: f64,
    latitude: f64,
    longitude: f64,
}

impl StationRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            state: row.get(3)?,
            price: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
        })
    }

    fn into_station(self) -> Result<FuelStation, SqliteStationStoreError> {
        let id = self.id;
        FuelStation::new(
            id,
            self.name,
            self.city,
            self.state,
            self.price,
            Coord {
                x: self.longitude,
                y: self.latitude,
            },
        )
        .map_err(|source| SqliteStationStoreError::InvalidStation { id, source })
    }
}

fn load_stations(connection: &Connection) -> Result<Vec<FuelStation>, SqliteStationStoreError> {
    let mut statement = connection.prepare(SELECT_STATIONS)?;
    let mut rows = statement.query([])?;
    let mut stations = Vec::new();
    while let Some(row) = rows.next()? {
        stations.push(StationRow::read(row)?.into_station()?);
    }
    Ok(stations)
}
