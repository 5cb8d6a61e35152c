//! Core domain types and the fuel-stop optimization engine.
//!
//! Given a driving [`Route`] and a [`StationStore`] of priced stations, the
//! [`FuelOptimizer`] picks where to refuel so the vehicle never runs out of
//! range, preferring cheap fuel and small detours. The pipeline is:
//!
//! 1. [`candidates`] narrows the catalog to the route's bounding box.
//! 2. [`sample`] thins the route polyline to evenly spaced waypoints.
//! 3. [`FuelStopSelector`] walks the waypoints, tracking remaining range and
//!    committing stops when fuel runs low.
//! 4. [`aggregate`] folds the stops into a [`TripPlan`].
//!
//! Distances are ellipsoidal geodesics memoised by [`DistanceCalculator`].
//! Route acquisition is abstracted behind [`RouteProvider`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod cache;
mod config;
mod coordinate;
mod distance;
mod error;
mod filter;
mod optimizer;
mod plan;
mod provider;
mod route;
mod sampler;
mod selector;
mod station;
mod store;

#[cfg_attr(not(feature = "test-support"), doc(hidden))]
pub mod test_support;

pub use aggregate::aggregate;
pub use cache::{Cache, TtlCache};
pub use config::{OptimizerConfig, VehicleProfile};
pub use coordinate::{CoordKey, KEY_PRECISION, is_valid_coordinate, round2};
pub use distance::{
    DEFAULT_DISTANCE_CACHE_ENTRIES, DEFAULT_DISTANCE_TTL, DistanceCache, DistanceCalculator,
    DistanceKey, METRES_PER_MILE, geodesic_miles,
};
pub use error::{InvalidInputError, OptimizeError};
pub use filter::{candidates, expand, route_bounds};
pub use optimizer::{FuelOptimizer, TripPlanner, TripRequest};
pub use plan::{CatalogStats, FuelStop, TripPlan};
pub use provider::{
    CachedRouteProvider, DEFAULT_ROUTE_CACHE_ENTRIES, DEFAULT_ROUTE_TTL, RouteCache,
    RouteFailureKind, RouteKey, RouteProvider, RouteProviderError,
};
pub use route::Route;
pub use sampler::{SampledRoute, sample};
pub use selector::{
    FuelStopSelector, Phase, ScoredCandidate, Selection, WalkState, deviation, score_candidates,
    select_best,
};
pub use station::{FuelStation, MAX_PRICE_PER_GALLON};
pub use store::{IndexedStationStore, StationStore, StoreError};
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use store::{SqliteStationStore, SqliteStationStoreError};
