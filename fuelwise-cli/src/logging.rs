//! Log output for the CLI.
//!
//! Library crates log through the `log` facade. The subscriber installed here
//! bridges those records and writes them to stderr, leaving stdout for JSON.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Honours `RUST_LOG`. Calling this more than once is harmless; later calls
/// leave the first subscriber in place.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(err) = installed {
        log::debug!("logging already initialised: {err}");
    }
}
