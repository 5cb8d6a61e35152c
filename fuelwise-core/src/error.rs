//! Error types raised by the optimization engine.

use thiserror::Error;

use crate::{RouteProviderError, StoreError};

/// Malformed route, vehicle, station or configuration parameters.
///
/// Each variant names the offending field so the calling layer can surface a
/// descriptive validation message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The total trip distance was negative.
    #[error("total_distance_miles must not be negative (got {value})")]
    NegativeDistance {
        /// Value supplied by the caller.
        value: f64,
    },
    /// A distance was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteDistance {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Fuel economy was zero or negative.
    #[error("vehicle_mpg must be positive (got {value})")]
    NonPositiveMpg {
        /// Value supplied by the caller.
        value: f64,
    },
    /// Vehicle range was zero or negative.
    #[error("vehicle_range_miles must be positive (got {value})")]
    NonPositiveRange {
        /// Value supplied by the caller.
        value: f64,
    },
    /// A trip with non-zero distance supplied no polyline points.
    #[error("polyline must contain at least one point for a trip of {distance_miles} miles")]
    EmptyPolyline {
        /// Total trip distance that required a polyline.
        distance_miles: f64,
    },
    /// A coordinate was outside the WGS84 range.
    #[error("{field} is not a valid WGS84 coordinate")]
    InvalidCoordinate {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A station price was outside `0.0..=10.0`.
    #[error("station {id} price {price} is outside 0.0..=10.0")]
    InvalidPrice {
        /// Station identifier.
        id: u64,
        /// Rejected price.
        price: f64,
    },
    /// A free-text location was blank.
    #[error("{field} location is required")]
    EmptyLocation {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A configuration value was not finite and positive.
    #[error("configuration value {field} must be finite and positive (got {value})")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Errors returned by [`FuelOptimizer::optimize`](crate::FuelOptimizer::optimize)
/// and [`TripPlanner::plan`](crate::TripPlanner::plan).
///
/// Collaborator failures are surfaced unchanged; the engine never retries.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Request parameters were malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The station repository failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The route provider failed.
    #[error(transparent)]
    Provider(#[from] RouteProviderError),
}
