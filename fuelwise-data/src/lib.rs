//! External data adapters for the Fuelwise engine.
//!
//! Responsibilities:
//! - Implement `fuelwise-core` collaborator traits against remote services.
//! - Decode provider wire formats into core domain types.
//!
//! Boundaries:
//! - Do not encode optimization rules (live in `fuelwise-core`).
//! - Keep blocking calls off async executors; see
//!   [`routing::HttpRouteProvider`] for the runtime bridge.
//!
//! Invariants:
//! - API keys never appear in error messages or debug output.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
