//! Read-only access to the fuel station catalog.
//!
//! The [`StationStore`] trait is the engine's only view of station data. The
//! engine asks for one bounding box per optimization and filters the result
//! further in memory, so implementations only need a range query.

use std::cmp::Ordering;
use std::error::Error as StdError;

use geo::Rect;
use thiserror::Error;

use crate::FuelStation;

mod indexed;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use indexed::IndexedStationStore;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteStationStore, SqliteStationStoreError};

/// Failure raised by a [`StationStore`] implementation.
///
/// The engine never retries; the error reaches the caller inside
/// [`OptimizeError::Store`](crate::OptimizeError::Store).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing repository could not be reached.
    #[error("station store unavailable: {message}")]
    Unavailable {
        /// Description of the outage.
        message: String,
    },
    /// A query failed inside the backing repository.
    #[error("station store query failed: {source}")]
    Backend {
        /// Error raised by the backend.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl StoreError {
    /// Wrap a backend error.
    #[must_use]
    pub fn backend<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(source),
        }
    }
}

/// Read-only access to priced fuel stations.
///
/// Coordinates use WGS84 with `x = longitude` and `y = latitude`. Results
/// are ordered by ascending price, ties broken by ascending station id, and
/// containment includes boundary points. Regions crossing the antimeridian
/// are not modelled.
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, Rect};
/// use fuelwise_core::{FuelStation, IndexedStationStore, StationStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let station = FuelStation::new(7, "Stop", "Amarillo", "TX", 2.99, Coord { x: -101.8, y: 35.2 })?;
/// let store = IndexedStationStore::new(vec![station.clone()]);
/// let bbox = Rect::new(Coord { x: -102.0, y: 35.0 }, Coord { x: -101.0, y: 36.0 });
/// assert_eq!(store.stations_in_bbox(&bbox)?, vec![station]);
/// # Ok(())
/// # }
/// ```
pub trait StationStore {
    /// Return every station inside `bbox`, cheapest first.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing repository fails. An empty
    /// result is not an error.
    fn stations_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError>;

    /// Return the whole catalog, cheapest first.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing repository fails.
    fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError>;
}

impl<S> StationStore for &S
where
    S: StationStore + ?Sized,
{
    fn stations_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError> {
        (**self).stations_in_bbox(bbox)
    }

    fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError> {
        (**self).all_stations()
    }
}

/// Order stations by ascending price, then ascending id.
pub(crate) fn by_price_then_id(a: &FuelStation, b: &FuelStation) -> Ordering {
    a.price_per_gallon()
        .total_cmp(&b.price_per_gallon())
        .then_with(|| a.id().cmp(&b.id()))
}

/// Sort `stations` into catalog order.
pub(crate) fn sort_by_price(stations: &mut [FuelStation]) {
    stations.sort_unstable_by(by_price_then_id);
}
