//! In-process TTL cache for analysis snapshots
//!
//! Entries expire after a fixed time-to-live. Besides expiry, the only
//! invalidation is a full [`TtlCache::clear`].
//!
//! # Example
//!
//! ```rust,ignore
//! use edutrend::cache::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(3600));
//! let key = TtlCache::<u32>::hash_key(&["today 3-m", "파이썬"]);
//! let value = cache.get_or_compute(&key, || async { 42 }).await;
//! ```

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Live entries at the time of the snapshot
    pub entries: usize,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Time-bounded key/value cache safe to share across tasks
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stable key for an ordered list of parts
    pub fn hash_key<S: AsRef<str>>(parts: &[S]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_ref().as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    fn is_fresh(&self, entry: &Entry<V>) -> bool {
        entry.inserted_at.elapsed() < self.ttl
    }

    /// Fresh value for `key`, if any
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if self.is_fresh(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %short(key), "Cache hit");
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %short(key), "Cache miss");
                None
            }
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let entry = Entry {
            value,
            inserted_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Cached value, or compute and store it
    ///
    /// A miss also drops every expired entry.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(key).await {
            return value;
        }

        let purged = self.purge_expired().await;
        if purged > 0 {
            tracing::debug!(purged = purged, "Purged expired cache entries");
        }

        let value = compute().await;
        self.insert(key, value.clone()).await;
        value
    }

    /// Drop every entry; returns how many were removed
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        tracing::info!(removed = removed, "Cleared cache");
        removed
    }

    /// Drop expired entries; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        before - entries.len()
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.values().filter(|e| self.is_fresh(e)).count(),
        }
    }
}

fn short(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test]
    async fn test_get_or_compute_caches_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_compute("k", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    7
                })
                .await;
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("k", 1).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.purge_expired().await, 1);
    }

    #[tokio::test]
    async fn test_miss_purges_expired_entries() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("old", 1).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        let value = cache.get_or_compute("new", || async { 2 }).await;

        assert_eq!(value, 2);
        let entries = cache.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("new"));
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        assert_eq!(cache.clear().await, 2);
        assert_eq!(cache.get("a").await, None);
    }

    #[test]
    fn test_hash_key_is_order_sensitive() {
        let a = TtlCache::<u8>::hash_key(&["x", "y"]);
        let b = TtlCache::<u8>::hash_key(&["y", "x"]);
        let c = TtlCache::<u8>::hash_key(&["xy"]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, TtlCache::<u8>::hash_key(&["x", "y"]));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            entries: 0,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
