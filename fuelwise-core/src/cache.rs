//! Concurrent time-to-live caches.
//!
//! Used for pairwise distances and provider route results. Entries are
//! memoised pure results, so a duplicate computation after a racing miss is
//! harmless and no stronger consistency is offered.

use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Key/value cache with per-entry expiry.
///
/// Implementations must be safe to share between threads.
pub trait Cache<K, V>: Send + Sync {
    /// Return the cached value for `key`, or `None` on a miss or expiry.
    fn get(&self, key: &K) -> Option<V>;

    /// Store `value` under `key` for `ttl`.
    fn set(&self, key: K, value: V, ttl: Duration);

    /// Return the cached value or compute, store and return a fresh one.
    fn get_or_insert_with<F>(&self, key: K, ttl: Duration, compute: F) -> V
    where
        K: Clone,
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.set(key, value.clone(), ttl);
        value
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
    expires_at: Instant,
}

/// [`Cache`] backed by a [`DashMap`].
///
/// Expired entries are dropped lazily on read and in bulk by
/// [`TtlCache::prune`]. An insert that overflows `max_entries` prunes the map
/// down to a low-water mark (90% of capacity), evicting the oldest entries
/// first, so the eviction scan runs once per batch of inserts rather than on
/// every insert into a full cache.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use fuelwise_core::{Cache, TtlCache};
///
/// let cache: TtlCache<&str, f64> = TtlCache::new(16);
/// cache.set("a", 1.5, Duration::from_secs(60));
/// assert_eq!(cache.get(&"a"), Some(1.5));
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Entry<V>>,
    max_entries: usize,
    low_water: usize,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache holding at most `max_entries`.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let headroom = max_entries.div_euclid(10).max(1);
        Self {
            entries: DashMap::new(),
            max_entries,
            low_water: max_entries.saturating_sub(headroom),
        }
    }

    /// Size the cache shrinks to once an insert overflows capacity.
    #[must_use]
    pub const fn low_water(&self) -> usize {
        self.low_water
    }

    /// Number of stored entries, including any not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries, then, if still over capacity, evict the oldest
    /// down to [`TtlCache::low_water`].
    pub fn prune(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);

        if self.entries.len() <= self.max_entries {
            return;
        }

        let mut by_age: Vec<(K, Instant)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().stored_at))
            .collect();
        let excess = by_age.len().saturating_sub(self.low_water);
        if let Some(pivot) = excess.checked_sub(1) {
            by_age.select_nth_unstable_by_key(pivot, |(_, stored_at)| *stored_at);
        }
        by_age.truncate(excess);
        for (key, _) in by_age {
            self.entries.remove(&key);
        }
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let hit = self.entries.get(key).map(|entry| {
            let fresh = entry.expires_at > now;
            (fresh, entry.value.clone())
        });
        match hit {
            Some((true, value)) => Some(value),
            Some((false, _)) => {
                self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: K, value: V, ttl: Duration) {
        let stored_at = Instant::now();
        let expires_at = stored_at.checked_add(ttl).unwrap_or(stored_at);
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at,
                expires_at,
            },
        );
        if self.entries.len() > self.max_entries {
            self.prune();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[rstest]
    fn returns_stored_value() {
        let cache = TtlCache::new(4);
        cache.set(1_u32, "one", Duration::from_secs(60));
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.get(&2), None);
    }

    #[rstest]
    fn zero_ttl_entries_expire_immediately() {
        let cache = TtlCache::new(4);
        cache.set(1_u32, 10_u32, Duration::ZERO);
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[rstest]
    fn get_or_insert_with_computes_once() {
        let cache = TtlCache::new(4);
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let value = cache.get_or_insert_with(7_u32, Duration::from_secs(60), || {
                calls.fetch_add(1, Ordering::SeqCst);
                49_u32
            });
            assert_eq!(value, 49);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn prune_enforces_capacity_oldest_first() {
        let cache = TtlCache::new(3);
        for key in 1..=4_u32 {
            cache.set(key, key, Duration::from_secs(60));
            thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(cache.len(), cache.low_water());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(3));
        assert_eq!(cache.get(&4), Some(4));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(10, 9)]
    #[case(100_000, 90_000)]
    fn low_water_leaves_headroom(#[case] capacity: usize, #[case] expected: usize) {
        let cache: TtlCache<u32, u32> = TtlCache::new(capacity);
        assert_eq!(cache.low_water(), expected);
    }

    #[rstest]
    fn full_cache_evicts_in_batches() {
        let capacity = 1_000_usize;
        let cache = TtlCache::new(capacity);
        let ttl = Duration::from_secs(60);
        for key in 0..capacity {
            cache.set(key, key, ttl);
        }
        assert_eq!(cache.len(), capacity);

        cache.set(capacity, capacity, ttl);
        assert_eq!(cache.len(), cache.low_water());

        // Refilling the headroom evicts nothing, so each insert grows the map.
        let headroom = capacity - cache.low_water();
        for (inserted, key) in (capacity + 1..=capacity + headroom).enumerate() {
            cache.set(key, key, ttl);
            assert_eq!(cache.len(), cache.low_water() + inserted + 1);
        }
        assert_eq!(cache.len(), capacity);
        assert_eq!(cache.get(&(capacity + headroom)), Some(capacity + headroom));
    }

    #[rstest]
    fn supports_concurrent_access() {
        let cache = Arc::new(TtlCache::new(1024));
        let handles: Vec<_> = (0..4_u32)
            .map(|worker| {
                let shared = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100_u32 {
                        let key = i % 10;
                        let value = shared.get_or_insert_with(key, Duration::from_secs(60), || {
                            key * 2
                        });
                        assert_eq!(value, key * 2, "worker {worker}");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker finished");
        }
        assert_eq!(cache.len(), 10);
    }
}
