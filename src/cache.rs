use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Memoization store for expensive query results.
///
/// Clearing a cache at any time is safe; it only costs recomputation.
pub trait ResultCache<V>: Send + Sync {
    /// Cached value for `key`, or None if absent or expired.
    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` under `key` for `ttl`. Overwrites any existing entry.
    fn set(&self, key: &str, value: V, ttl: Duration);

    /// Drop every entry.
    fn clear(&self);

    /// Drop expired entries and return how many were removed.
    fn purge_expired(&self) -> usize {
        0
    }
}

/// A stored value with its lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub value: V,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// An entry whose expiry lies past the representable range never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .checked_add_signed(self.ttl)
            .map_or(false, |expires_at| now >= expires_at)
    }
}

/// In-process cache with lazy time-based expiry.
/// Expired entries are discarded when read; `purge_expired` sweeps the rest.
/// A poisoned lock behaves like an empty cache.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send> ResultCache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let key = normalize_key(key);
        let mut entries = self.entries.lock().ok()?;
        let expired = entries.get(&key)?.is_expired_at(Utc::now());
        if expired {
            entries.remove(&key);
            debug!("Cache entry '{}' expired", key);
            return None;
        }
        debug!("Cache hit for '{}'", key);
        entries.get(&key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        let key = normalize_key(key);
        if let Ok(mut entries) = self.entries.lock() {
            debug!("Caching '{}' for {}s", key, ttl.num_seconds());
            entries.insert(
                key.clone(),
                CacheEntry {
                    key,
                    value,
                    created_at: Utc::now(),
                    ttl,
                },
            );
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn purge_expired(&self) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let now = Utc::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        debug!("Purged {} expired cache entries", removed);
        removed
    }
}

/// A cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl<V> ResultCache<V> for NoopCache {
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn set(&self, _key: &str, _value: V, _ttl: Duration) {}

    fn clear(&self) {}
}

/// Normalize a cache key: trim whitespace, collapse multiple spaces.
/// Case is kept; grade names that differ only in case are different keys.
fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
