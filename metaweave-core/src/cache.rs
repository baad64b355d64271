//! In-memory TTL cache with a pluggable key comparator.
//!
//! Entries are kept in insertion order and found by linear scan, which is
//! fine for the handful of searches a session issues. Expired entries are
//! dropped when a lookup runs into them and swept on every insert. A TTL too
//! large to represent as a deadline never expires.

use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

type Comparator<K> = Box<dyn Fn(&K, &K) -> bool + Send + Sync>;

#[derive(Debug, Clone)]
struct CacheEntry<K, V> {
    key: K,
    value: V,
    /// `None` when `ttl` overflows the clock.
    expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

pub struct TtlCache<K, V> {
    entries: Mutex<Vec<CacheEntry<K, V>>>,
    same_key: Comparator<K>,
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

impl<K: PartialEq + 'static, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq + 'static, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(|a: &K, b: &K| a == b)
    }
}

impl<K, V: Clone> TtlCache<K, V> {
    pub fn with_comparator<F>(same_key: F) -> Self
    where
        F: Fn(&K, &K) -> bool + Send + Sync + 'static,
    {
        Self {
            entries: Mutex::new(Vec::new()),
            same_key: Box::new(same_key),
        }
    }

    /// Live value for `key`. An expired match is removed.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let position = entries.iter().position(|entry| (self.same_key)(&entry.key, key))?;

        if entries[position].is_live(now) {
            debug!("Cache HIT");
            Some(entries[position].value.clone())
        } else {
            debug!("Cache entry expired");
            entries.remove(position);
            None
        }
    }

    pub fn has(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` for `ttl`, replacing any entry with an equal key.
    /// Expired entries are dropped on the way.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl);
        if expires_at.is_none() {
            debug!("Cache TTL {:?} overflows the clock; entry never expires", ttl);
        }

        let mut entries = self.entries.lock();
        entries.retain(|entry| entry.is_live(now) && !(self.same_key)(&entry.key, &key));
        entries.push(CacheEntry {
            key,
            value,
            expires_at,
        });
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|entry| entry.is_live(now));
        before - entries.len()
    }

    /// Stored entries, expired ones included until they are evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
