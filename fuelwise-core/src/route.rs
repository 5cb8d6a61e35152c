//! Driving routes produced by a [`RouteProvider`](crate::RouteProvider).

use geo::Coord;

use crate::{InvalidInputError, is_valid_coordinate};

/// A driving route between two coordinates.
///
/// The polyline is ordered in travel order and uses `x = longitude`,
/// `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::Route;
///
/// # fn main() -> Result<(), fuelwise_core::InvalidInputError> {
/// let start = Coord { x: -74.0, y: 40.7 };
/// let end = Coord { x: -75.2, y: 39.9 };
/// let route = Route::new(vec![start, end], 95.0, start, end)?;
/// assert_eq!(route.polyline().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    polyline: Vec<Coord<f64>>,
    total_distance_miles: f64,
    start: Coord<f64>,
    end: Coord<f64>,
}

impl Route {
    /// Validate and construct a [`Route`].
    ///
    /// # Errors
    /// Returns [`InvalidInputError`] for a negative or non-finite distance, an
    /// empty polyline on a trip with non-zero distance, or coordinates outside
    /// the WGS84 range.
    pub fn new(
        polyline: Vec<Coord<f64>>,
        total_distance_miles: f64,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<Self, InvalidInputError> {
        validate_distance(total_distance_miles)?;
        if polyline.is_empty() && total_distance_miles > 0.0 {
            return Err(InvalidInputError::EmptyPolyline {
                distance_miles: total_distance_miles,
            });
        }
        if !is_valid_coordinate(start) {
            return Err(InvalidInputError::InvalidCoordinate { field: "start" });
        }
        if !is_valid_coordinate(end) {
            return Err(InvalidInputError::InvalidCoordinate { field: "end" });
        }
        if !polyline.iter().copied().all(is_valid_coordinate) {
            return Err(InvalidInputError::InvalidCoordinate { field: "polyline" });
        }
        Ok(Self {
            polyline,
            total_distance_miles,
            start,
            end,
        })
    }

    /// Ordered route geometry.
    #[must_use]
    pub fn polyline(&self) -> &[Coord<f64>] {
        &self.polyline
    }

    /// Total driving distance in miles.
    #[must_use]
    pub const fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    /// Trip origin.
    #[must_use]
    pub const fn start(&self) -> Coord<f64> {
        self.start
    }

    /// Trip destination.
    #[must_use]
    pub const fn end(&self) -> Coord<f64> {
        self.end
    }

    /// Consume the route, returning its polyline.
    #[must_use]
    pub fn into_polyline(self) -> Vec<Coord<f64>> {
        self.polyline
    }
}

fn validate_distance(total_distance_miles: f64) -> Result<(), InvalidInputError> {
    if !total_distance_miles.is_finite() {
        return Err(InvalidInputError::NonFiniteDistance {
            field: "total_distance_miles",
        });
    }
    if total_distance_miles < 0.0 {
        return Err(InvalidInputError::NegativeDistance {
            value: total_distance_miles,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ends() -> (Coord<f64>, Coord<f64>) {
        (Coord { x: -74.0, y: 40.7 }, Coord { x: -118.2, y: 34.0 })
    }

    #[rstest]
    fn accepts_zero_distance_without_points(ends: (Coord<f64>, Coord<f64>)) {
        let (start, end) = ends;
        let route = Route::new(Vec::new(), 0.0, start, end).expect("zero-length trip");
        assert!(route.polyline().is_empty());
    }

    #[rstest]
    fn rejects_empty_polyline_for_real_trip(ends: (Coord<f64>, Coord<f64>)) {
        let (start, end) = ends;
        let err = Route::new(Vec::new(), 12.0, start, end).expect_err("empty polyline");
        assert!(matches!(err, InvalidInputError::EmptyPolyline { .. }));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(-0.001)]
    fn rejects_negative_distance(ends: (Coord<f64>, Coord<f64>), #[case] distance: f64) {
        let (start, end) = ends;
        let err = Route::new(vec![start, end], distance, start, end).expect_err("negative");
        assert!(matches!(err, InvalidInputError::NegativeDistance { .. }));
    }

    #[rstest]
    fn rejects_infinite_distance(ends: (Coord<f64>, Coord<f64>)) {
        let (start, end) = ends;
        let err = Route::new(vec![start, end], f64::INFINITY, start, end).expect_err("inf");
        assert!(matches!(err, InvalidInputError::NonFiniteDistance { .. }));
    }

    #[rstest]
    fn rejects_out_of_range_polyline_point(ends: (Coord<f64>, Coord<f64>)) {
        let (start, end) = ends;
        let polyline = vec![start, Coord { x: 0.0, y: 95.0 }, end];
        let err = Route::new(polyline, 10.0, start, end).expect_err("bad point");
        assert_eq!(
            err,
            InvalidInputError::InvalidCoordinate { field: "polyline" }
        );
    }
}
