//! Public entry points: [`FuelOptimizer`] and [`TripPlanner`].

use std::sync::Arc;

use geo::Coord;
use log::info;

use crate::{
    Cache, DEFAULT_DISTANCE_CACHE_ENTRIES, DistanceCache, DistanceCalculator, DistanceKey,
    FuelStopSelector, InvalidInputError, OptimizeError, OptimizerConfig, Route, RouteProvider,
    StationStore, TripPlan, VehicleProfile, aggregate,
};

/// Everything needed to plan fuel for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Trip origin.
    pub start: Coord<f64>,
    /// Trip destination.
    pub end: Coord<f64>,
    /// Route geometry in travel order.
    pub polyline: Vec<Coord<f64>>,
    /// Driving distance in miles.
    pub total_distance_miles: f64,
    /// Vehicle making the trip.
    pub vehicle: VehicleProfile,
}

impl TripRequest {
    /// Request for `route` driven by `vehicle`.
    #[must_use]
    pub fn for_route(route: &Route, vehicle: VehicleProfile) -> Self {
        Self {
            start: route.start(),
            end: route.end(),
            polyline: route.polyline().to_vec(),
            total_distance_miles: route.total_distance_miles(),
            vehicle,
        }
    }
}

/// Plans refuelling stops against a station catalog.
///
/// The optimizer owns its store, configuration and distance calculator.
/// Calls are independent; it is `Send + Sync` whenever the store is.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::{FuelOptimizer, IndexedStationStore, TripRequest, VehicleProfile};
///
/// # fn main() -> Result<(), fuelwise_core::OptimizeError> {
/// let optimizer = FuelOptimizer::new(IndexedStationStore::default());
/// let start = Coord { x: -97.74, y: 30.27 };
/// let end = Coord { x: -96.80, y: 32.78 };
/// let plan = optimizer.optimize(&TripRequest {
///     start,
///     end,
///     polyline: vec![start, end],
///     total_distance_miles: 195.0,
///     vehicle: VehicleProfile::new(500.0, 10.0),
/// })?;
/// assert!(plan.fuel_stops.is_empty());
/// assert_eq!(plan.estimated_gallons, 19.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FuelOptimizer<S, C = DistanceCache>
where
    C: Cache<DistanceKey, f64>,
{
    store: S,
    config: OptimizerConfig,
    distances: DistanceCalculator<C>,
}

impl<S> FuelOptimizer<S, DistanceCache>
where
    S: StationStore,
{
    /// Optimizer over `store` with default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, OptimizerConfig::default())
    }

    /// Optimizer over `store` with `config` and a private distance cache.
    #[must_use]
    pub fn with_config(store: S, config: OptimizerConfig) -> Self {
        let distances = DistanceCalculator::with_cache(
            Arc::new(DistanceCache::new(DEFAULT_DISTANCE_CACHE_ENTRIES)),
            config.distance_cache_ttl,
        );
        Self {
            store,
            config,
            distances,
        }
    }
}

impl<S, C> FuelOptimizer<S, C>
where
    S: StationStore,
    C: Cache<DistanceKey, f64>,
{
    /// Optimizer sharing an existing distance calculator and its cache.
    #[must_use]
    pub const fn with_distance_calculator(
        store: S,
        config: OptimizerConfig,
        distances: DistanceCalculator<C>,
    ) -> Self {
        Self {
            store,
            config,
            distances,
        }
    }

    /// The station catalog.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Plan fuel stops for `request`.
    ///
    /// # Errors
    /// Returns [`OptimizeError::InvalidInput`] for malformed vehicle, route
    /// or configuration values and [`OptimizeError::Store`] when the catalog
    /// query fails. A route with no nearby stations is not an error.
    pub fn optimize(&self, request: &TripRequest) -> Result<TripPlan, OptimizeError> {
        let route = Route::new(
            request.polyline.clone(),
            request.total_distance_miles,
            request.start,
            request.end,
        )?;
        self.optimize_route(route, request.vehicle)
    }

    /// Plan fuel stops for an already validated `route`.
    ///
    /// # Errors
    /// As for [`FuelOptimizer::optimize`].
    pub fn optimize_route(
        &self,
        route: Route,
        vehicle: VehicleProfile,
    ) -> Result<TripPlan, OptimizeError> {
        self.config.validate()?;
        vehicle.validate()?;
        let selection =
            FuelStopSelector::new(&self.config, &self.distances).select(&self.store, &route, vehicle)?;
        Ok(aggregate(
            route,
            selection.stops,
            selection.skipped_refuels,
            vehicle.mpg,
        ))
    }
}

/// Fetches a route by name and plans fuel for it with the default vehicle.
///
/// Wrap the provider in a [`CachedRouteProvider`](crate::CachedRouteProvider)
/// to reuse routes across calls.
#[derive(Debug)]
pub struct TripPlanner<P, S, C = DistanceCache>
where
    C: Cache<DistanceKey, f64>,
{
    provider: P,
    optimizer: FuelOptimizer<S, C>,
}

impl<P, S, C> TripPlanner<P, S, C>
where
    P: RouteProvider,
    S: StationStore,
    C: Cache<DistanceKey, f64>,
{
    /// Planner combining `provider` and `optimizer`.
    #[must_use]
    pub const fn new(provider: P, optimizer: FuelOptimizer<S, C>) -> Self {
        Self {
            provider,
            optimizer,
        }
    }

    /// The wrapped optimizer.
    #[must_use]
    pub const fn optimizer(&self) -> &FuelOptimizer<S, C> {
        &self.optimizer
    }

    /// Plan a trip between two free-text locations.
    ///
    /// # Errors
    /// Returns [`OptimizeError::Provider`] when the route cannot be fetched,
    /// plus any error from [`FuelOptimizer::optimize_route`].
    pub fn plan(&self, start: &str, end: &str) -> Result<TripPlan, OptimizeError> {
        let vehicle = self.optimizer.config().vehicle();
        self.plan_with(start, end, vehicle)
    }

    /// Plan a trip with an explicit `vehicle`.
    ///
    /// # Errors
    /// As for [`TripPlanner::plan`].
    pub fn plan_with(
        &self,
        start: &str,
        end: &str,
        vehicle: VehicleProfile,
    ) -> Result<TripPlan, OptimizeError> {
        if start.trim().is_empty() {
            return Err(InvalidInputError::EmptyLocation { field: "start" }.into());
        }
        if end.trim().is_empty() {
            return Err(InvalidInputError::EmptyLocation { field: "end" }.into());
        }
        info!("planning route from {start} to {end}");
        let route = self.provider.route(start, end)?;
        let plan = self.optimizer.optimize_route(route, vehicle)?;
        info!(
            "optimization complete: {} stops, ${:.2} total cost",
            plan.stops_count, plan.total_fuel_cost
        );
        Ok(plan)
    }
}
