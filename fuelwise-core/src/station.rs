//! Priced fuel stations supplied by a [`StationStore`](crate::StationStore).

use geo::Coord;
use rstar::{AABB, RTreeObject};

use crate::{InvalidInputError, is_valid_coordinate};

/// Highest retail price accepted for a station, in dollars per gallon.
pub const MAX_PRICE_PER_GALLON: f64 = 10.0;

/// A fuel station with its retail price.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Stations are
/// immutable snapshots for the duration of an optimization. Every station,
/// including deserialised ones, passes through [`FuelStation::new`], so the
/// price is always finite and within range.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::FuelStation;
///
/// # fn main() -> Result<(), fuelwise_core::InvalidInputError> {
/// let station = FuelStation::new(
///     7,
///     "Pilot Travel Center",
///     "Joliet",
///     "IL",
///     3.199,
///     Coord { x: -88.08, y: 41.52 },
/// )?;
/// assert_eq!(station.id(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "StationRecord")
)]
pub struct FuelStation {
    id: u64,
    name: String,
    city: String,
    state: String,
    price_per_gallon: f64,
    location: Coord<f64>,
}

/// Unvalidated wire form of a [`FuelStation`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StationRecord {
    id: u64,
    name: String,
    city: String,
    state: String,
    price_per_gallon: f64,
    location: Coord<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<StationRecord> for FuelStation {
    type Error = InvalidInputError;

    fn try_from(record: StationRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.id,
            record.name,
            record.city,
            record.state,
            record.price_per_gallon,
            record.location,
        )
    }
}

impl FuelStation {
    /// Validate and construct a [`FuelStation`].
    ///
    /// # Errors
    /// Returns [`InvalidInputError::InvalidPrice`] when the price is outside
    /// `0.0..=10.0` and [`InvalidInputError::InvalidCoordinate`] when the
    /// location is not a finite WGS84 position.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        price_per_gallon: f64,
        location: Coord<f64>,
    ) -> Result<Self, InvalidInputError> {
        if !(0.0..=MAX_PRICE_PER_GALLON).contains(&price_per_gallon) {
            return Err(InvalidInputError::InvalidPrice {
                id,
                price: price_per_gallon,
            });
        }
        if !is_valid_coordinate(location) {
            return Err(InvalidInputError::InvalidCoordinate {
                field: "station.location",
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            price_per_gallon,
            location,
        })
    }

    /// OPIS truck-stop identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// City name.
    #[must_use]
    pub const fn city(&self) -> &str {
        self.city.as_str()
    }

    /// Two-letter state code.
    #[must_use]
    pub const fn state(&self) -> &str {
        self.state.as_str()
    }

    /// Retail price in dollars per gallon.
    #[must_use]
    pub const fn price_per_gallon(&self) -> f64 {
        self.price_per_gallon
    }

    /// Geospatial position.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Return `"City, ST"` for display.
    #[must_use]
    pub fn location_display(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

impl RTreeObject for FuelStation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x, self.location.y])
    }
}
