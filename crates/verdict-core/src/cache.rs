//! Per-validator analysis cache using moka.
//!
//! Built with no capacity and no TTL: entries live until `clear`. Growth is
//! unbounded, so owners of long-lived validators must clear periodically.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;
use serde::Serialize;

/// Hit/miss snapshot for introspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub hit_rate: f64,
}

/// Memoises expensive analyses (NLP documents, domain classifications, ...).
///
/// Exclusively owned by one validator instance.
pub struct AnalysisCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<K, V>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> AnalysisCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        self.cache.insert(key, value.clone());
        value
    }

    /// Like `get_or_compute`, but failures are returned and never cached.
    pub fn get_or_try_compute<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute()?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }

    /// Peek without touching the hit/miss counters.
    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to compute.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// `hits / (hits + misses)`, or 0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Whether no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and zero the counters.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot for `get_analysis_statistics`.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits(),
            misses: self.misses(),
            entries: self.len(),
            hit_rate: self.hit_rate(),
        }
    }
}

impl<K, V> Default for AnalysisCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_is_a_hit() {
        let cache: AnalysisCache<String, usize> = AnalysisCache::new();
        let first = cache.get_or_compute("hello".to_string(), || 5);
        let second = cache.get_or_compute("hello".to_string(), || 99);
        assert_eq!(first, 5);
        assert_eq!(second, 5);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn failed_computations_are_not_cached() {
        let cache: AnalysisCache<String, usize> = AnalysisCache::new();
        let err: Result<usize, &str> = cache.get_or_try_compute("k".to_string(), || Err("nope"));
        assert!(err.is_err());
        let ok: Result<usize, &str> = cache.get_or_try_compute("k".to_string(), || Ok(3));
        assert_eq!(ok, Ok(3));
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn clear_empties_cache_and_counters() {
        let cache: AnalysisCache<String, usize> = AnalysisCache::new();
        cache.get_or_compute("a".to_string(), || 1);
        cache.get_or_compute("a".to_string(), || 1);
        cache.clear();
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 0);
    }
}
