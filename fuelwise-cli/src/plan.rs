//! Plan command implementation for the Fuelwise CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fuelwise_core::{
    FuelOptimizer, OptimizerConfig, RouteProvider, StationStore, TripPlan, TripPlanner,
    VehicleProfile,
};
use fuelwise_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_END, ARG_MARGIN, ARG_START, ARG_STATIONS_DB,
    ARG_VEHICLE_MPG, ARG_VEHICLE_RANGE, CliError, DEFAULT_STATIONS_DB, ENV_API_KEY, ENV_END,
    ENV_START, fs::require_existing, open_station_store, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch a driving route between two free-text locations and \
                 choose where to refuel along it, preferring cheap fuel and \
                 small detours. Prints the trip plan as JSON.",
    about = "Plan fuel stops for a trip"
)]
#[ortho_config(prefix = "FUELWISE")]
pub(crate) struct PlanArgs {
    /// Trip origin, e.g. "Austin, TX".
    #[arg(value_name = "start")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Trip destination, e.g. "Dallas, TX".
    #[arg(value_name = "end")]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Path to the SQLite station catalog.
    #[arg(long = ARG_STATIONS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) stations_db: Option<Utf8PathBuf>,
    /// MapQuest API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Override the directions endpoint.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Vehicle range on a full tank, in miles.
    #[arg(long = ARG_VEHICLE_RANGE, value_name = "miles")]
    #[serde(default)]
    pub(crate) vehicle_range: Option<f64>,
    /// Vehicle fuel economy, in miles per gallon.
    #[arg(long = ARG_VEHICLE_MPG, value_name = "mpg")]
    #[serde(default)]
    pub(crate) vehicle_mpg: Option<f64>,
    /// Padding around the route when searching the catalog, in degrees.
    #[arg(long = ARG_MARGIN, value_name = "degrees")]
    #[serde(default)]
    pub(crate) margin: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) stations_db: Utf8PathBuf,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) vehicle: VehicleProfile,
    pub(crate) margin_degrees: f64,
}

impl PlanConfig {
    pub(crate) fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            vehicle_range_miles: self.vehicle.range_miles,
            vehicle_mpg: self.vehicle.mpg,
            bounding_box_margin_degrees: self.margin_degrees,
            ..OptimizerConfig::default()
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let start = args.start.ok_or(CliError::MissingArgument {
            field: ARG_START,
            env: ENV_START,
        })?;
        let end = args.end.ok_or(CliError::MissingArgument {
            field: ARG_END,
            env: ENV_END,
        })?;
        let api_key = args.api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: ENV_API_KEY,
        })?;

        let defaults = OptimizerConfig::default();
        let vehicle = VehicleProfile::new(
            args.vehicle_range.unwrap_or(defaults.vehicle_range_miles),
            args.vehicle_mpg.unwrap_or(defaults.vehicle_mpg),
        );
        let config = Self {
            start,
            end,
            stations_db: args
                .stations_db
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATIONS_DB)),
            api_key,
            base_url: args
                .base_url
                .unwrap_or_else(|| HttpRouteProviderConfig::default().base_url),
            vehicle,
            margin_degrees: args.margin.unwrap_or(defaults.bounding_box_margin_degrees),
        };
        config.vehicle.validate()?;
        config.optimizer_config().validate()?;
        Ok(config)
    }
}

/// Builds the collaborators for one `plan` invocation.
pub(crate) trait PlanBackend {
    fn station_store(&self, path: &Utf8Path) -> Result<Box<dyn StationStore>, CliError>;
    fn route_provider(&self, config: &PlanConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(crate) struct DefaultPlanBackend;

impl PlanBackend for DefaultPlanBackend {
    fn station_store(&self, path: &Utf8Path) -> Result<Box<dyn StationStore>, CliError> {
        Ok(Box::new(open_station_store(path)?))
    }

    fn route_provider(&self, config: &PlanConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        let provider_config =
            HttpRouteProviderConfig::new(config.api_key.clone()).with_base_url(&config.base_url);
        let provider = HttpRouteProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    backend: &dyn PlanBackend,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, backend)?;
    write_json(writer, &plan)
}

fn execute_plan(args: PlanArgs, backend: &dyn PlanBackend) -> Result<TripPlan, CliError> {
    let config = args.into_config()?;
    require_existing(&config.stations_db, ARG_STATIONS_DB)?;

    let store = backend.station_store(&config.stations_db)?;
    let provider = backend.route_provider(&config)?;
    let optimizer = FuelOptimizer::with_config(store.as_ref(), config.optimizer_config());
    let planner = TripPlanner::new(provider.as_ref(), optimizer);

    let plan = planner
        .plan_with(&config.start, &config.end, config.vehicle)
        .map_err(|err| CliError::Plan(Box::new(err)))?;
    info!(
        "{} to {}: {:.1} miles, {} stops",
        config.start, config.end, plan.total_distance_miles, plan.stops_count
    );
    Ok(plan)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
