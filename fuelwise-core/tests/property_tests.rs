//! Property-based tests for the fuel optimizer.
//!
//! # Invariants tested
//!
//! - **Progress order:** stops appear in non-decreasing distance from start.
//! - **Rounding:** gallons and costs carry at most two decimals, and the
//!   plan total is the rounded sum of stop costs.
//! - **Short trips:** a trip within range never stops and costs nothing.
//! - **Determinism:** identical inputs give identical plans.
//! - **Deviation:** detours are never negative.

#![expect(
    clippy::expect_used,
    reason = "property tests should fail fast when setup breaks"
)]
#![expect(clippy::float_arithmetic, reason = "generators build coordinates")]

use geo::Coord;
use proptest::prelude::*;

use fuelwise_core::{
    DistanceCalculator, FuelOptimizer, FuelStation, IndexedStationStore, TripPlan, TripRequest,
    VehicleProfile, deviation, geodesic_miles, round2, test_support::station,
};

/// Meridian route starting at 30N with `points` evenly spaced vertices.
fn meridian_route(span_degrees: f64, points: u8) -> (Vec<Coord<f64>>, f64) {
    let steps = f64::from(points.saturating_sub(1).max(1));
    let polyline: Vec<_> = (0..points)
        .map(|i| Coord {
            x: -100.0,
            y: 30.0 + span_degrees * f64::from(i) / steps,
        })
        .collect();
    let total = polyline
        .windows(2)
        .map(|pair| match pair {
            [a, b] => geodesic_miles(*a, *b),
            _ => 0.0,
        })
        .sum();
    (polyline, total)
}

fn station_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-100.6_f64..-99.4_f64, 30.0_f64..40.0_f64, 2.0_f64..5.0_f64)
}

fn stations_strategy() -> impl Strategy<Value = Vec<FuelStation>> {
    proptest::collection::vec(station_strategy(), 0..12).prop_map(|raw| {
        raw.into_iter()
            .zip(1_u64..)
            .map(|((x, y, price), id)| station(id, round2(price), Coord { x, y }))
            .collect()
    })
}

fn vehicle_strategy() -> impl Strategy<Value = VehicleProfile> {
    (150.0_f64..600.0_f64, 5.0_f64..30.0_f64)
        .prop_map(|(range, mpg)| VehicleProfile::new(range, mpg))
}

fn plan_for(
    stations: &[FuelStation],
    polyline: Vec<Coord<f64>>,
    total: f64,
    vehicle: VehicleProfile,
) -> TripPlan {
    let start = *polyline.first().expect("route start");
    let end = *polyline.last().expect("route end");
    let store = IndexedStationStore::new(stations.iter().cloned());
    FuelOptimizer::new(store)
        .optimize(&TripRequest {
            start,
            end,
            polyline,
            total_distance_miles: total,
            vehicle,
        })
        .expect("optimization should succeed")
}

fn has_two_decimals(value: f64) -> bool {
    (round2(value) - value).abs() < 1e-9
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn stops_follow_travel_order(
        stations in stations_strategy(),
        vehicle in vehicle_strategy(),
        span in 2.0_f64..10.0_f64,
        points in 5_u8..30_u8,
    ) {
        let (polyline, total) = meridian_route(span, points);
        let plan = plan_for(&stations, polyline, total, vehicle);
        let progress: Vec<_> = plan
            .fuel_stops
            .iter()
            .map(|stop| stop.distance_from_start_miles)
            .collect();
        prop_assert!(progress.windows(2).all(|w| matches!(w, [a, b] if a <= b)));
        prop_assert_eq!(plan.stops_count, plan.fuel_stops.len());
    }

    #[test]
    fn amounts_are_rounded_to_cents(
        stations in stations_strategy(),
        vehicle in vehicle_strategy(),
        span in 2.0_f64..10.0_f64,
        points in 5_u8..30_u8,
    ) {
        let (polyline, total) = meridian_route(span, points);
        let plan = plan_for(&stations, polyline, total, vehicle);
        for stop in &plan.fuel_stops {
            prop_assert!(has_two_decimals(stop.gallons_needed));
            prop_assert!(has_two_decimals(stop.cost_at_stop));
            prop_assert!(stop.gallons_needed >= 0.0);
        }
        let sum: f64 = plan.fuel_stops.iter().map(|stop| stop.cost_at_stop).sum();
        let expected = if plan.fuel_stops.is_empty() { 0.0 } else { round2(sum) };
        prop_assert_eq!(plan.total_fuel_cost, expected);
    }

    #[test]
    fn trips_within_range_never_stop(
        stations in stations_strategy(),
        range in 300.0_f64..1_000.0_f64,
        mpg in 5.0_f64..30.0_f64,
        span in 0.5_f64..4.0_f64,
    ) {
        let (polyline, total) = meridian_route(span, 8);
        prop_assume!(total <= range);
        let plan = plan_for(&stations, polyline, total, VehicleProfile::new(range, mpg));
        prop_assert!(plan.fuel_stops.is_empty());
        prop_assert_eq!(plan.total_fuel_cost, 0.0);
        prop_assert_eq!(plan.skipped_refuels, 0);
    }

    #[test]
    fn identical_inputs_give_identical_plans(
        stations in stations_strategy(),
        vehicle in vehicle_strategy(),
        span in 2.0_f64..10.0_f64,
    ) {
        let (polyline, total) = meridian_route(span, 20);
        let first = plan_for(&stations, polyline.clone(), total, vehicle);
        let mut reversed = stations.clone();
        reversed.reverse();
        let second = plan_for(&reversed, polyline, total, vehicle);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn deviation_is_never_negative(
        (px, py) in (-110.0_f64..-90.0_f64, 25.0_f64..45.0_f64),
        (sx, sy) in (-110.0_f64..-90.0_f64, 25.0_f64..45.0_f64),
        (ex, ey) in (-110.0_f64..-90.0_f64, 25.0_f64..45.0_f64),
    ) {
        let distances = DistanceCalculator::new();
        let detour = deviation(
            &distances,
            Coord { x: px, y: py },
            Coord { x: sx, y: sy },
            Coord { x: ex, y: ey },
        );
        prop_assert!(detour >= 0.0);
        prop_assert!(detour.is_finite());
    }
}
