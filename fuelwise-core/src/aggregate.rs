//! Folding selected stops into trip totals.

use crate::{FuelStop, Route, TripPlan, round2};

/// Assemble the [`TripPlan`] for `route` and its `stops`.
///
/// `total_fuel_cost` sums only fuel bought at the selected stops. The route
/// geometry is passed through untouched.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::{Route, aggregate};
///
/// # fn main() -> Result<(), fuelwise_core::InvalidInputError> {
/// let a = Coord { x: -97.7, y: 30.3 };
/// let b = Coord { x: -96.8, y: 32.8 };
/// let plan = aggregate(Route::new(vec![a, b], 400.0, a, b)?, Vec::new(), 0, 10.0);
/// assert_eq!(plan.estimated_gallons, 40.0);
/// assert_eq!(plan.total_fuel_cost, 0.0);
/// # Ok(())
/// # }
/// ```
#[expect(clippy::float_arithmetic, reason = "fuel totals")]
#[must_use]
pub fn aggregate(route: Route, stops: Vec<FuelStop>, skipped_refuels: usize, mpg: f64) -> TripPlan {
    let total_distance_miles = route.total_distance_miles();
    let total_fuel_cost = if stops.is_empty() {
        0.0
    } else {
        round2(stops.iter().map(|stop| stop.cost_at_stop).sum())
    };
    TripPlan {
        geometry: route.into_polyline(),
        total_distance_miles,
        total_fuel_cost,
        estimated_gallons: total_distance_miles / mpg,
        stops_count: stops.len(),
        fuel_stops: stops,
        skipped_refuels,
    }
}
