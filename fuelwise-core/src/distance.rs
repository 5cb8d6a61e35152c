//! Memoised geodesic distances in statute miles.
//!
//! Distances use Karney's ellipsoidal geodesic rather than a planar or
//! spherical approximation; stops can be hundreds of miles apart.

use std::sync::Arc;
use std::time::Duration;

use geo::{Coord, Distance, Geodesic, Point};

use crate::{Cache, CoordKey, TtlCache, is_valid_coordinate};

/// Metres in one statute mile.
pub const METRES_PER_MILE: f64 = 1_609.344;

/// Default lifetime of a memoised distance.
pub const DEFAULT_DISTANCE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default capacity of the shared distance cache.
pub const DEFAULT_DISTANCE_CACHE_ENTRIES: usize = 100_000;

/// Cache key for an ordered pair of coordinates.
pub type DistanceKey = (CoordKey, CoordKey);

/// Shared cache type used by [`DistanceCalculator`].
pub type DistanceCache = TtlCache<DistanceKey, f64>;

/// Geodesic distance between two coordinates, in miles, without caching.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::geodesic_miles;
///
/// let chicago = Coord { x: -87.6298, y: 41.8781 };
/// let st_louis = Coord { x: -90.1994, y: 38.6270 };
/// let miles = geodesic_miles(chicago, st_louis);
/// assert!((miles - 262.2).abs() < 1.0);
/// ```
#[expect(clippy::float_arithmetic, reason = "unit conversion")]
#[must_use]
pub fn geodesic_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Geodesic.distance(Point::from(a), Point::from(b)) / METRES_PER_MILE
}

/// Geodesic distance calculator backed by a shared [`Cache`].
///
/// Keys are rounded to four decimal degrees, so two points within roughly
/// eleven metres share a cached value. Cloning shares the cache.
#[derive(Debug)]
pub struct DistanceCalculator<C = DistanceCache>
where
    C: Cache<DistanceKey, f64>,
{
    cache: Arc<C>,
    ttl: Duration,
}

impl DistanceCalculator<DistanceCache> {
    /// Create a calculator with a private cache and the default TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(
            Arc::new(TtlCache::new(DEFAULT_DISTANCE_CACHE_ENTRIES)),
            DEFAULT_DISTANCE_TTL,
        )
    }
}

impl<C> Clone for DistanceCalculator<C>
where
    C: Cache<DistanceKey, f64>,
{
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
        }
    }
}

impl Default for DistanceCalculator<DistanceCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DistanceCalculator<C>
where
    C: Cache<DistanceKey, f64>,
{
    /// Create a calculator sharing `cache`, storing results for `ttl`.
    #[must_use]
    pub const fn with_cache(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Distance from `a` to `b` in miles.
    ///
    /// Both coordinates must be valid WGS84 positions; anything else is a
    /// caller fault.
    #[must_use]
    pub fn distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        debug_assert!(
            is_valid_coordinate(a) && is_valid_coordinate(b),
            "distance called with invalid coordinates {a:?} -> {b:?}"
        );
        let key = (CoordKey::new(a), CoordKey::new(b));
        self.cache
            .get_or_insert_with(key, self.ttl, || geodesic_miles(a, b))
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}
