//! Command-line interface for the Fuelwise trip planner.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use fuelwise_core::SqliteStationStore;
use serde::Serialize;

mod error;
mod fs;
mod logging;
mod plan;
mod stats;

pub use error::CliError;
pub use logging::init_logging;

use plan::{DefaultPlanBackend, PlanArgs};
use stats::StatsArgs;

pub(crate) const ARG_START: &str = "start";
pub(crate) const ARG_END: &str = "end";
pub(crate) const ARG_STATIONS_DB: &str = "stations-db";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_VEHICLE_RANGE: &str = "vehicle-range";
pub(crate) const ARG_VEHICLE_MPG: &str = "vehicle-mpg";
pub(crate) const ARG_MARGIN: &str = "margin";
pub(crate) const ENV_START: &str = "FUELWISE_CMDS_PLAN_START";
pub(crate) const ENV_END: &str = "FUELWISE_CMDS_PLAN_END";
pub(crate) const ENV_API_KEY: &str = "FUELWISE_CMDS_PLAN_API_KEY";

/// Catalog file used when `--stations-db` is not given.
pub const DEFAULT_STATIONS_DB: &str = "stations.db";

/// Run the Fuelwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, the catalog, the
/// route provider or the optimizer fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging();
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Plan(args) => plan::run_plan_with(args, &DefaultPlanBackend, &mut stdout),
        Command::Stats(args) => stats::run_stats_with(args, &mut stdout),
    }
}

/// Open the SQLite catalog at `path`.
pub(crate) fn open_station_store(path: &Utf8Path) -> Result<SqliteStationStore, CliError> {
    SqliteStationStore::open(path.as_std_path()).map_err(|source| CliError::OpenStationStore {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelwise",
    about = "Plan the cheapest fuel stops along a driving route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a route and plan refuelling stops along it.
    Plan(PlanArgs),
    /// Summarise the station catalog.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
