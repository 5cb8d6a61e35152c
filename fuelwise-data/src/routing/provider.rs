//! HTTP-based `RouteProvider` using the MapQuest Directions API.
//!
//! [`RouteProvider`] is synchronous so the optimizer stays embeddable in
//! synchronous callers. This provider bridges to async HTTP by blocking on a
//! Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use fuelwise_core::RouteProvider;
//! use fuelwise_data::routing::HttpRouteProvider;
//!
//! let provider = HttpRouteProvider::new("my-api-key")?;
//! let route = provider.route("Austin, TX", "Dallas, TX")?;
//! println!("{} miles", route.total_distance_miles());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::time::Duration;

use fuelwise_core::{Route, RouteProvider, RouteProviderError};
use log::info;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::mapquest::DirectionsResponse;

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL does not parse.
    #[error("invalid routing base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default MapQuest Directions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com/directions/v2/route";

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "fuelwise-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone)]
pub struct HttpRouteProviderConfig {
    /// Directions endpoint URL.
    pub base_url: String,
    /// MapQuest API key; requests fail with
    /// [`RouteProviderError::MissingApiKey`] while unset.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a configuration for the default endpoint with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Set the directions endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP route provider for the MapQuest Directions API.
///
/// One request both geocodes the free-text locations and computes the
/// route. The provider owns a Tokio runtime reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider blocks on its own runtime. Inside a
/// multi-threaded runtime it uses that runtime's handle with
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// falls back to its own runtime, which can deadlock if the request depends
/// on IO driven by the caller's runtime.
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl fmt::Debug for HttpRouteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteProvider")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpRouteProvider {
    /// Create a provider for the default endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the directions request URL.
    fn build_url(&self, api_key: &str, start: &str, end: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("from", start)
            .append_pair("to", end)
            .append_pair("unit", "m")
            .append_pair("routeType", "fastest")
            .append_pair("fullShape", "true")
            .append_pair("shapeFormat", "raw");
        url
    }

    async fn fetch_route_async(
        &self,
        api_key: &str,
        start: &str,
        end: &str,
    ) -> Result<Route, RouteProviderError> {
        let url = self.build_url(api_key, start, end);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let directions: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| RouteProviderError::Parse {
                    message: err.without_url().to_string(),
                })?;

        directions.into_route(start, end)
    }

    /// Convert a reqwest error to a `RouteProviderError`.
    ///
    /// The request URL carries the API key, so it is stripped from messages.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> RouteProviderError {
        if error.is_timeout() {
            return RouteProviderError::Timeout {
                timeout: self.config.timeout,
            };
        }

        let message = strip_url(error);
        match error.status() {
            Some(status) => RouteProviderError::Http {
                status: status.as_u16(),
                message,
            },
            None => RouteProviderError::Network { message },
        }
    }
}

fn strip_url(error: &reqwest::Error) -> String {
    let full = error.to_string();
    match error.url() {
        Some(url) => full.replace(url.as_str(), "<routing endpoint>"),
        None => full,
    }
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch the route between two free-text locations.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime, that runtime must be multi-threaded;
    /// see the type-level documentation.
    fn route(&self, start: &str, end: &str) -> Result<Route, RouteProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RouteProviderError::MissingApiKey)?;

        info!("requesting route from {start} to {end}");
        let future = self.fetch_route_async(api_key, start, end);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
