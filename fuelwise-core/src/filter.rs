//! Bounding-box prefilter over the station catalog.

use geo::{Coord, Rect};
use log::warn;

use crate::{FuelStation, StationStore, StoreError};

/// Axis-aligned extent of `polyline`, or `None` when it is empty.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::route_bounds;
///
/// let bounds = route_bounds(&[Coord { x: -97.0, y: 30.0 }, Coord { x: -96.0, y: 33.0 }])
///     .expect("non-empty polyline");
/// assert_eq!(bounds.min(), Coord { x: -97.0, y: 30.0 });
/// assert_eq!(bounds.max(), Coord { x: -96.0, y: 33.0 });
/// ```
#[must_use]
pub fn route_bounds(polyline: &[Coord<f64>]) -> Option<Rect<f64>> {
    let (first, rest) = polyline.split_first()?;
    let (min, max) = rest.iter().fold((*first, *first), |(min, max), point| {
        (
            Coord {
                x: min.x.min(point.x),
                y: min.y.min(point.y),
            },
            Coord {
                x: max.x.max(point.x),
                y: max.y.max(point.y),
            },
        )
    });
    Some(Rect::new(min, max))
}

/// Expand `bounds` by `margin_degrees` on every side.
#[expect(clippy::float_arithmetic, reason = "padding a bounding box")]
#[must_use]
pub fn expand(bounds: Rect<f64>, margin_degrees: f64) -> Rect<f64> {
    let min = bounds.min();
    let max = bounds.max();
    Rect::new(
        Coord {
            x: min.x - margin_degrees,
            y: min.y - margin_degrees,
        },
        Coord {
            x: max.x + margin_degrees,
            y: max.y + margin_degrees,
        },
    )
}

/// Stations near `polyline`, cheapest first with ties by id.
///
/// Queries `store` once with the route extent padded by `margin_degrees`.
/// An empty polyline yields an empty result without consulting the store.
///
/// # Errors
/// Propagates [`StoreError`] from the store unchanged.
pub fn candidates<S>(
    store: &S,
    polyline: &[Coord<f64>],
    margin_degrees: f64,
) -> Result<Vec<FuelStation>, StoreError>
where
    S: StationStore + ?Sized,
{
    let Some(bounds) = route_bounds(polyline) else {
        return Ok(Vec::new());
    };
    let bbox = expand(bounds, margin_degrees);
    let mut stations = store.stations_in_bbox(&bbox)?;
    // Selection relies on catalog order whatever the store returns.
    stations.sort_by(crate::store::by_price_then_id);
    if stations.is_empty() {
        warn!(
            "no fuel stations within {margin_degrees} degrees of route bounds {:?} to {:?}",
            bbox.min(),
            bbox.max()
        );
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStationStore, station};
    use rstest::rstest;
    use std::cell::Cell;

    struct CountingStore {
        calls: Cell<usize>,
    }

    impl StationStore for CountingStore {
        fn stations_in_bbox(&self, _bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Vec::new())
        }

        fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[rstest]
    fn empty_polyline_skips_the_store() {
        let store = CountingStore {
            calls: Cell::new(0),
        };
        let found = candidates(&store, &[], 0.5).expect("query");
        assert!(found.is_empty());
        assert_eq!(store.calls.get(), 0);
    }

    #[rstest]
    fn margin_widens_the_query() {
        let store = MemoryStationStore::with_stations([
            station(1, 3.0, Coord { x: -96.6, y: 31.0 }),
            station(2, 3.0, Coord { x: -95.0, y: 31.0 }),
        ]);
        let polyline = [Coord { x: -97.0, y: 30.0 }, Coord { x: -97.0, y: 32.0 }];
        let ids: Vec<_> = candidates(&store, &polyline, 0.5)
            .expect("query")
            .iter()
            .map(FuelStation::id)
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[rstest]
    fn single_point_route_has_degenerate_bounds() {
        let p = Coord { x: 10.0, y: 20.0 };
        let bounds = route_bounds(&[p]).expect("bounds");
        assert_eq!(bounds.min(), p);
        assert_eq!(bounds.max(), p);
    }

    #[rstest]
    fn results_are_cheapest_first() {
        let store = MemoryStationStore::with_stations([
            station(5, 3.50, Coord { x: 0.0, y: 0.0 }),
            station(4, 2.50, Coord { x: 0.1, y: 0.1 }),
            station(3, 2.50, Coord { x: 0.2, y: 0.2 }),
        ]);
        let ids: Vec<_> = candidates(&store, &[Coord { x: 0.0, y: 0.0 }], 0.5)
            .expect("query")
            .iter()
            .map(FuelStation::id)
            .collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }
}
