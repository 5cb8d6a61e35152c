//! Facade crate for the Fuelwise trip planner.
//!
//! This crate re-exports the core optimization engine and exposes the
//! optional store and HTTP routing adapters behind feature flags.

#![forbid(unsafe_code)]

pub use fuelwise_core::{
    CachedRouteProvider, CatalogStats, FuelOptimizer, FuelStation, FuelStop, IndexedStationStore,
    InvalidInputError, OptimizeError, OptimizerConfig, Route, RouteFailureKind, RouteProvider,
    RouteProviderError, StationStore, StoreError, TripPlan, TripPlanner, TripRequest,
    VehicleProfile,
};

#[cfg(feature = "store-sqlite")]
pub use fuelwise_core::{SqliteStationStore, SqliteStationStoreError};

#[cfg(feature = "http-routing")]
pub use fuelwise_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
