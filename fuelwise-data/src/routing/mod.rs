//! HTTP route providers.
//!
//! [`HttpRouteProvider`] implements [`fuelwise_core::RouteProvider`] against
//! the MapQuest Directions API. A single request geocodes both free-text
//! locations and returns the full route geometry.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fuelwise_core::{CachedRouteProvider, RouteProvider};
//! use fuelwise_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//!
//! let config = HttpRouteProviderConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_user_agent("my-app/1.0");
//! let provider = CachedRouteProvider::new(HttpRouteProvider::with_config(config)?);
//!
//! let route = provider.route("Austin, TX", "Dallas, TX")?;
//! println!("{} points", route.polyline().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod mapquest;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
