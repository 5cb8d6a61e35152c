//! Route provider trait and a caching decorator.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::{Cache, Route, TtlCache};

/// Default lifetime of a cached route.
pub const DEFAULT_ROUTE_TTL: Duration = Duration::from_secs(60 * 60);

/// Default capacity of the route cache.
pub const DEFAULT_ROUTE_CACHE_ENTRIES: usize = 1_024;

/// Broad failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteFailureKind {
    /// The provider could not be reached or answered with an error.
    ProviderUnavailable,
    /// Both locations resolved but no drivable route joins them.
    NoRouteFound,
    /// A location could not be resolved.
    InvalidLocation,
}

/// Errors raised by a [`RouteProvider`].
#[derive(Debug, Error)]
pub enum RouteProviderError {
    /// The provider was unreachable or failed without further detail.
    #[error("route provider unavailable: {message}")]
    ProviderUnavailable {
        /// Description of the failure.
        message: String,
    },
    /// No route joins the requested locations.
    #[error("no route found from {start} to {end}")]
    NoRouteFound {
        /// Requested origin.
        start: String,
        /// Requested destination.
        end: String,
    },
    /// A location could not be resolved.
    #[error("invalid location: {message}")]
    InvalidLocation {
        /// Provider's description of the rejected location.
        message: String,
    },
    /// The provider needs an API key and none was configured.
    #[error("route provider API key is not configured")]
    MissingApiKey,
    /// The request exceeded its deadline.
    #[error("route request timed out after {timeout:?}")]
    Timeout {
        /// Configured request timeout.
        timeout: Duration,
    },
    /// The provider answered with a non-success HTTP status.
    #[error("route provider returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt or reason phrase.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting route provider: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },
    /// The response could not be decoded into a route.
    #[error("failed to parse route response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

impl RouteProviderError {
    /// Category of this failure.
    ///
    /// # Examples
    /// ```
    /// use fuelwise_core::{RouteFailureKind, RouteProviderError};
    ///
    /// let err = RouteProviderError::MissingApiKey;
    /// assert_eq!(err.kind(), RouteFailureKind::ProviderUnavailable);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> RouteFailureKind {
        match self {
            Self::NoRouteFound { .. } => RouteFailureKind::NoRouteFound,
            Self::InvalidLocation { .. } => RouteFailureKind::InvalidLocation,
            Self::ProviderUnavailable { .. }
            | Self::MissingApiKey
            | Self::Timeout { .. }
            | Self::Http { .. }
            | Self::Network { .. }
            | Self::Parse { .. } => RouteFailureKind::ProviderUnavailable,
        }
    }
}

/// Resolve two free-text locations into a driving [`Route`].
pub trait RouteProvider {
    /// Fetch the route from `start` to `end`.
    ///
    /// # Errors
    /// Returns [`RouteProviderError`] when the route cannot be produced.
    fn route(&self, start: &str, end: &str) -> Result<Route, RouteProviderError>;
}

impl<P> RouteProvider for &P
where
    P: RouteProvider + ?Sized,
{
    fn route(&self, start: &str, end: &str) -> Result<Route, RouteProviderError> {
        (**self).route(start, end)
    }
}

impl<P> RouteProvider for Box<P>
where
    P: RouteProvider + ?Sized,
{
    fn route(&self, start: &str, end: &str) -> Result<Route, RouteProviderError> {
        (**self).route(start, end)
    }
}

/// Cache key for a route request.
pub type RouteKey = (String, String);

/// Shared cache type used by [`CachedRouteProvider`].
pub type RouteCache = TtlCache<RouteKey, Route>;

/// [`RouteProvider`] decorator that memoises successful routes.
///
/// Keys are the trimmed origin and destination strings. Failures are never
/// cached.
#[derive(Debug)]
pub struct CachedRouteProvider<P, C = RouteCache>
where
    C: Cache<RouteKey, Route>,
{
    inner: P,
    cache: Arc<C>,
    ttl: Duration,
}

impl<P> CachedRouteProvider<P, RouteCache> {
    /// Wrap `inner` with a private cache and the default TTL.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self::with_cache(
            inner,
            Arc::new(TtlCache::new(DEFAULT_ROUTE_CACHE_ENTRIES)),
            DEFAULT_ROUTE_TTL,
        )
    }
}

impl<P, C> CachedRouteProvider<P, C>
where
    C: Cache<RouteKey, Route>,
{
    /// Wrap `inner`, sharing `cache` and storing routes for `ttl`.
    #[must_use]
    pub const fn with_cache(inner: P, cache: Arc<C>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P, C> RouteProvider for CachedRouteProvider<P, C>
where
    P: RouteProvider,
    C: Cache<RouteKey, Route>,
{
    fn route(&self, start: &str, end: &str) -> Result<Route, RouteProviderError> {
        let key = (start.trim().to_owned(), end.trim().to_owned());
        if let Some(route) = self.cache.get(&key) {
            info!("using cached route from {} to {}", key.0, key.1);
            return Ok(route);
        }
        let route = self.inner.route(&key.0, &key.1)?;
        self.cache.set(key, route.clone(), self.ttl);
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubRouteProvider;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn route() -> Route {
        let start = Coord { x: -97.74, y: 30.27 };
        let end = Coord { x: -96.80, y: 32.78 };
        Route::new(vec![start, end], 195.0, start, end).expect("valid route")
    }

    #[rstest]
    fn caches_successful_routes(route: Route) {
        let stub = StubRouteProvider::returning(route.clone());
        let provider = CachedRouteProvider::new(&stub);

        let first = provider.route("Austin, TX", "Dallas, TX").expect("route");
        let second = provider.route("  Austin, TX ", "Dallas, TX").expect("route");

        assert_eq!(first, route);
        assert_eq!(second, route);
        assert_eq!(stub.calls(), 1);
    }

    #[rstest]
    fn boxed_providers_can_be_cached(route: Route) {
        let boxed: Box<dyn RouteProvider> = Box::new(StubRouteProvider::returning(route.clone()));
        let provider = CachedRouteProvider::new(boxed);

        assert_eq!(provider.route("Austin, TX", "Dallas, TX").expect("route"), route);
    }

    #[rstest]
    fn failures_are_not_cached() {
        let stub = StubRouteProvider::failing(|| RouteProviderError::InvalidLocation {
            message: "Nowhere".to_owned(),
        });
        let provider = CachedRouteProvider::new(&stub);

        for _ in 0..2 {
            let err = provider.route("Nowhere", "Dallas, TX").expect_err("invalid");
            assert_eq!(err.kind(), RouteFailureKind::InvalidLocation);
        }
        assert_eq!(stub.calls(), 2);
    }

    #[rstest]
    #[case(RouteProviderError::Timeout { timeout: Duration::from_secs(15) }, RouteFailureKind::ProviderUnavailable)]
    #[case(RouteProviderError::Http { status: 503, message: "busy".to_owned() }, RouteFailureKind::ProviderUnavailable)]
    #[case(RouteProviderError::NoRouteFound { start: "A".to_owned(), end: "B".to_owned() }, RouteFailureKind::NoRouteFound)]
    #[case(RouteProviderError::Parse { message: "eof".to_owned() }, RouteFailureKind::ProviderUnavailable)]
    fn detail_variants_map_to_categories(
        #[case] error: RouteProviderError,
        #[case] expected: RouteFailureKind,
    ) {
        assert_eq!(error.kind(), expected);
    }
}
