//! Greedy fuel stop selection.
//!
//! The selector walks the sampled route keeping track of remaining range.
//! When the range drops below the low-fuel threshold it scores every nearby
//! candidate by `price + deviation * weight` and commits the cheapest one.
//! The walk is a fold over [`WalkState`]; nothing outlives a single call.
#![expect(
    clippy::float_arithmetic,
    reason = "range tracking and scoring are floating-point by nature"
)]

use std::cmp::Ordering;

use geo::Coord;
use log::{debug, info, warn};

use crate::{
    Cache, DistanceCalculator, DistanceKey, FuelStation, FuelStop, OptimizerConfig, Route,
    StationStore, StoreError, VehicleProfile, candidates, round2, sample,
};

/// Whether the walk is looking for fuel at the current point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Enough range remains; keep driving.
    Cruising,
    /// Range is low; search for a station near this point.
    Searching,
}

impl Phase {
    /// Phase at a sampled point.
    #[must_use]
    pub fn at(remaining_range: f64, low_fuel_miles: f64, progress: f64, total: f64) -> Self {
        if remaining_range < low_fuel_miles && progress < total {
            Self::Searching
        } else {
            Self::Cruising
        }
    }
}

/// A station considered during one low-fuel search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// The candidate station.
    pub station: &'a FuelStation,
    /// Distance from the sampled point to the station, in miles.
    pub distance_to_point: f64,
    /// Extra miles incurred by driving through the station.
    pub deviation: f64,
    /// `price + deviation * weight`; lower is better.
    pub score: f64,
}

impl ScoredCandidate<'_> {
    /// Total order used for selection: score, then price, then station id.
    #[must_use]
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| {
                self.station
                    .price_per_gallon()
                    .total_cmp(&other.station.price_per_gallon())
            })
            .then_with(|| self.station.id().cmp(&other.station.id()))
    }
}

/// Detour through `station` compared with driving from `point` to `end`.
///
/// Never negative; the triangle inequality can be violated by a few
/// hundredths of a mile through cache-key rounding.
#[must_use]
pub fn deviation<C>(
    distances: &DistanceCalculator<C>,
    point: Coord<f64>,
    station: Coord<f64>,
    end: Coord<f64>,
) -> f64
where
    C: Cache<DistanceKey, f64>,
{
    let via = distances.distance(point, station) + distances.distance(station, end);
    (via - distances.distance(point, end)).max(0.0)
}

/// Score every station within `radius_miles` of `point`.
///
/// Output order follows `stations`.
#[must_use]
pub fn score_candidates<'a, C>(
    distances: &DistanceCalculator<C>,
    stations: &'a [FuelStation],
    point: Coord<f64>,
    end: Coord<f64>,
    radius_miles: f64,
    deviation_weight: f64,
) -> Vec<ScoredCandidate<'a>>
where
    C: Cache<DistanceKey, f64>,
{
    stations
        .iter()
        .filter_map(|station| {
            let distance_to_point = distances.distance(point, station.location());
            if distance_to_point > radius_miles {
                return None;
            }
            let deviation = deviation(distances, point, station.location(), end);
            Some(ScoredCandidate {
                station,
                distance_to_point,
                deviation,
                score: station.price_per_gallon() + deviation * deviation_weight,
            })
        })
        .collect()
}

/// Lowest-ranked candidate, see [`ScoredCandidate::cmp_rank`].
#[must_use]
pub fn select_best<'a, I>(candidates: I) -> Option<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = ScoredCandidate<'a>>,
{
    candidates.into_iter().min_by(ScoredCandidate::cmp_rank)
}

/// Stops chosen along a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Committed stops in travel order.
    pub stops: Vec<FuelStop>,
    /// Low-fuel searches that found no station in range.
    pub skipped_refuels: usize,
}

/// Accumulator threaded through the route walk.
#[derive(Debug, Clone)]
pub struct WalkState {
    remaining_range: f64,
    last_stop: Coord<f64>,
    previous: Option<Coord<f64>>,
    selection: Selection,
}

impl WalkState {
    /// Full tank at `start`.
    #[must_use]
    pub const fn new(range_miles: f64, start: Coord<f64>) -> Self {
        Self {
            remaining_range: range_miles,
            last_stop: start,
            previous: None,
            selection: Selection {
                stops: Vec::new(),
                skipped_refuels: 0,
            },
        }
    }

    /// Finish the walk.
    #[must_use]
    pub fn into_selection(self) -> Selection {
        self.selection
    }
}

/// Chooses refuelling stops for a route.
#[derive(Debug)]
pub struct FuelStopSelector<'c, C>
where
    C: Cache<DistanceKey, f64>,
{
    config: &'c OptimizerConfig,
    distances: &'c DistanceCalculator<C>,
}

struct Walk<'w> {
    candidates: &'w [FuelStation],
    vehicle: VehicleProfile,
    end: Coord<f64>,
    total: f64,
    sampled: usize,
}

impl<'c, C> FuelStopSelector<'c, C>
where
    C: Cache<DistanceKey, f64>,
{
    /// Selector using `config` tunables and shared `distances`.
    #[must_use]
    pub const fn new(config: &'c OptimizerConfig, distances: &'c DistanceCalculator<C>) -> Self {
        Self { config, distances }
    }

    /// Choose stops for `route` driven by `vehicle`.
    ///
    /// Trips within range return no stops without touching `store`. A
    /// low-fuel point with no station in range is skipped and counted.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the candidate query.
    pub fn select<S>(
        &self,
        store: &S,
        route: &Route,
        vehicle: VehicleProfile,
    ) -> Result<Selection, StoreError>
    where
        S: StationStore + ?Sized,
    {
        let total = route.total_distance_miles();
        if total <= vehicle.range_miles {
            info!("short trip ({total:.1} miles), no fuel stops needed");
            return Ok(Selection::default());
        }

        let stations = candidates(
            store,
            route.polyline(),
            self.config.bounding_box_margin_degrees,
        )?;
        // An empty catalog still walks the route so every low-fuel point is
        // counted as a skipped refuel.
        info!("found {} stations in route area", stations.len());

        let sampled = sample(
            route.polyline(),
            total,
            self.config.sample_interval_miles,
        );
        let walk = Walk {
            candidates: &stations,
            vehicle,
            end: route.end(),
            total,
            sampled: sampled.len(),
        };
        let state = sampled
            .iter()
            .enumerate()
            .fold(WalkState::new(vehicle.range_miles, route.start()), |state, (i, point)| {
                self.advance(&walk, state, i, point)
            });
        Ok(state.into_selection())
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "sample counts are far below 2^52"
    )]
    fn advance(&self, walk: &Walk<'_>, mut state: WalkState, i: usize, point: Coord<f64>) -> WalkState {
        let progress = (i as f64 / walk.sampled as f64) * walk.total;
        let low_fuel_miles = self.config.low_fuel_threshold_fraction * walk.vehicle.range_miles;

        if Phase::at(state.remaining_range, low_fuel_miles, progress, walk.total) == Phase::Searching
        {
            debug!("low fuel at {progress:.1} miles, searching for station");
            state = self.refuel(walk, state, point, progress);
        }

        if let Some(previous) = state.previous {
            state.remaining_range -= self.distances.distance(previous, point);
        }
        state.previous = Some(point);
        state
    }

    fn refuel(
        &self,
        walk: &Walk<'_>,
        mut state: WalkState,
        point: Coord<f64>,
        progress: f64,
    ) -> WalkState {
        let radius = self.config.search_radius_fraction * walk.vehicle.range_miles;
        let scored = score_candidates(
            self.distances,
            walk.candidates,
            point,
            walk.end,
            radius,
            self.config.deviation_weight,
        );
        let Some(best) = select_best(scored) else {
            warn!(
                "no fuel station within {radius:.1} miles at {progress:.1} miles; \
                 continuing with {:.1} miles of range",
                state.remaining_range
            );
            state.selection.skipped_refuels += 1;
            return state;
        };

        debug_assert!(best.deviation >= 0.0, "negative deviation {}", best.deviation);
        let station = best.station;
        let since_last = self.distances.distance(state.last_stop, station.location());
        let gallons = round2(since_last / walk.vehicle.mpg);
        let cost = round2(gallons * station.price_per_gallon());
        state
            .selection
            .stops
            .push(FuelStop::at_station(station, progress, gallons, cost));
        info!(
            "fuel stop #{}: {} ({}) - ${}/gal",
            state.selection.stops.len(),
            station.name(),
            station.location_display(),
            station.price_per_gallon()
        );

        state.last_stop = station.location();
        state.remaining_range = walk.vehicle.range_miles;
        state
    }
}
