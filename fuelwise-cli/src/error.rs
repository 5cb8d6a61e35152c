//! Error types emitted by the Fuelwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fuelwise_core::{InvalidInputError, OptimizeError, SqliteStationStoreError, StoreError};
use fuelwise_data::routing::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Fuelwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The vehicle or optimizer settings are invalid.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] InvalidInputError),
    /// Opening the station catalog failed.
    #[error("failed to open station catalog {path:?}: {source}")]
    OpenStationStore {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying store error.
        #[source]
        source: Box<SqliteStationStoreError>,
    },
    /// Listing stations from the catalog failed.
    #[error("failed to read station catalog: {0}")]
    ReadStations(#[from] StoreError),
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// Configured endpoint.
        base_url: String,
        /// Underlying build error.
        #[source]
        source: ProviderBuildError,
    },
    /// Trip planning failed.
    #[error("trip planning failed: {0}")]
    Plan(#[source] Box<OptimizeError>),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
