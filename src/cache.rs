//! In-memory TTL cache.
//!
//! Entries expire for [`TtlCache::get`] once their TTL has elapsed, but they
//! are kept so that [`TtlCache::get_stale_or_fresh`] can still serve them
//! when a refresh fails. Growth is bounded by a least-recently-used cap;
//! apart from that, entries are only replaced by a newer `put`.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

/// Default entry TTL (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of entries.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// A cached value with its expiry time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Cached value.
    pub value: V,
    /// Instant at which the entry stops being fresh.
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Check if the entry is still fresh at `now`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe key/value cache with per-entry TTL and stale reads.
pub struct TtlCache<V> {
    entries: Mutex<LruCache<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache holding at most `max_entries` entries.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl,
        }
    }

    /// Default TTL applied by [`TtlCache::put_default`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get a value if it exists and has not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    /// Get a value regardless of its expiry.
    pub fn get_stale_or_fresh(&self, key: &str) -> Option<V> {
        self.lock().get(key).map(|entry| entry.value.clone())
    }

    /// Insert or replace a value with the given TTL.
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        let key = key.into();
        let replaced = self.lock().push(key.clone(), entry);
        if let Some((evicted, _)) = replaced {
            if evicted != key {
                tracing::trace!(key = %evicted, "cache entry evicted");
            }
        }
    }

    /// Insert or replace a value with the default TTL.
    pub fn put_default(&self, key: impl Into<String>, value: V) {
        self.put(key, value, self.default_ttl);
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry<V>>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}
