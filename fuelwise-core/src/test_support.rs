//! In-memory collaborators used by unit and behaviour tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{Coord, Intersects, Rect};

use crate::{FuelStation, Route, RouteProvider, RouteProviderError, StationStore, StoreError};

/// Build a valid station named after its id.
///
/// # Panics
/// Panics when `price` or `location` is invalid.
#[expect(clippy::expect_used, reason = "test fixtures fail fast on bad input")]
#[must_use]
pub fn station(id: u64, price: f64, location: Coord<f64>) -> FuelStation {
    FuelStation::new(
        id,
        format!("Station {id}"),
        "Springfield",
        "TX",
        price,
        location,
    )
    .expect("test station should be valid")
}

/// In-memory `StationStore` performing a linear scan.
///
/// Counts range queries so tests can assert the store was, or was not,
/// consulted.
#[derive(Debug, Default)]
pub struct MemoryStationStore {
    stations: Vec<FuelStation>,
    outage: Option<String>,
    queries: AtomicUsize,
}

impl MemoryStationStore {
    /// Store holding `stations`.
    pub fn with_stations<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = FuelStation>,
    {
        Self {
            stations: stations.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Store whose every query fails with [`StoreError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            outage: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of range queries served so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check_outage(&self) -> Result<(), StoreError> {
        match &self.outage {
            Some(message) => Err(StoreError::Unavailable {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl StationStore for MemoryStationStore {
    fn stations_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check_outage()?;
        let mut found: Vec<_> = self
            .stations
            .iter()
            // `Intersects` treats boundary points as inside the rectangle.
            .filter(|s| bbox.intersects(&s.location()))
            .cloned()
            .collect();
        crate::store::sort_by_price(&mut found);
        Ok(found)
    }

    fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError> {
        self.check_outage()?;
        let mut all = self.stations.clone();
        crate::store::sort_by_price(&mut all);
        Ok(all)
    }
}

type ErrorFactory = Box<dyn Fn() -> RouteProviderError + Send + Sync>;

enum StubResponse {
    Route(Route),
    Failure(ErrorFactory),
}

/// `RouteProvider` returning a canned route or error and counting calls.
pub struct StubRouteProvider {
    response: StubResponse,
    calls: AtomicUsize,
}

impl fmt::Debug for StubRouteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = match &self.response {
            StubResponse::Route(_) => "route",
            StubResponse::Failure(_) => "failure",
        };
        f.debug_struct("StubRouteProvider")
            .field("response", &response)
            .field("calls", &self.calls())
            .finish()
    }
}

impl StubRouteProvider {
    /// Provider answering every request with `route`.
    pub const fn returning(route: Route) -> Self {
        Self {
            response: StubResponse::Route(route),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider failing every request with the error built by `make_error`.
    pub fn failing<F>(make_error: F) -> Self
    where
        F: Fn() -> RouteProviderError + Send + Sync + 'static,
    {
        Self {
            response: StubResponse::Failure(Box::new(make_error)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteProvider for StubRouteProvider {
    fn route(&self, _start: &str, _end: &str) -> Result<Route, RouteProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Route(route) => Ok(route.clone()),
            StubResponse::Failure(make_error) => Err(make_error()),
        }
    }
}

/// Create a `fuel_stations` table at `path` holding `stations`.
///
/// # Errors
/// Returns any SQLite error raised while writing.
#[cfg(feature = "store-sqlite")]
pub fn write_station_database(
    path: &std::path::Path,
    stations: &[FuelStation],
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS fuel_stations (
            opis_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            retail_price REAL NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL
        );",
    )?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO fuel_stations \
             (opis_id, name, city, state, retail_price, latitude, longitude) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for s in stations {
            insert.execute(rusqlite::params![
                s.id(),
                s.name(),
                s.city(),
                s.state(),
                s.price_per_gallon(),
                s.location().y,
                s.location().x,
            ])?;
        }
    }
    tx.commit()
}
