//! Stats command: summarise the station catalog.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fuelwise_core::{CatalogStats, StationStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_STATIONS_DB, CliError, DEFAULT_STATIONS_DB, fs::require_existing, open_station_store,
    write_json,
};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Report station count, state coverage and price range")]
#[ortho_config(prefix = "FUELWISE")]
pub(crate) struct StatsArgs {
    /// Path to the SQLite station catalog.
    #[arg(long = ARG_STATIONS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) stations_db: Option<Utf8PathBuf>,
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = merged
        .stations_db
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATIONS_DB));
    require_existing(&path, ARG_STATIONS_DB)?;

    let store = open_station_store(&path)?;
    let stations = store.all_stations()?;
    write_json(writer, &CatalogStats::from_stations(&stations))
}
