//! Coordinate helpers shared by the engine.
//!
//! Coordinates are WGS84 [`Coord`] values with `x = longitude` and
//! `y = latitude`, in decimal degrees.

use geo::Coord;

/// Decimal places kept when coordinates are used as cache keys.
///
/// Four places is roughly 11 metres of latitude.
pub const KEY_PRECISION: u32 = 4;

/// Return whether `coord` is a finite WGS84 position.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::is_valid_coordinate;
///
/// assert!(is_valid_coordinate(Coord { x: -74.0, y: 40.7 }));
/// assert!(!is_valid_coordinate(Coord { x: 200.0, y: 0.0 }));
/// ```
#[must_use]
pub fn is_valid_coordinate(coord: Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && (-180.0..=180.0).contains(&coord.x)
        && (-90.0..=90.0).contains(&coord.y)
}

/// A coordinate rounded to [`KEY_PRECISION`] decimal places.
///
/// Stored as scaled integers so the key is `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat: i64,
    lon: i64,
}

impl CoordKey {
    /// Round `coord` into a hashable key.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "valid coordinates scaled by 10^4 fit comfortably in i64"
    )]
    #[must_use]
    pub fn new(coord: Coord<f64>) -> Self {
        let scale = f64::from(10_u32.pow(KEY_PRECISION));
        Self {
            lat: (coord.y * scale).round() as i64,
            lon: (coord.x * scale).round() as i64,
        }
    }
}

impl From<Coord<f64>> for CoordKey {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord)
    }
}

/// Round `value` to two decimal places, as used for gallons and money.
#[expect(clippy::float_arithmetic, reason = "currency rounding")]
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
