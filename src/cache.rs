//! Route resolution caching
//!
//! Memoizes the outcome of scanning the route table for a path, misses
//! included, with LRU eviction. Any registration can change which route a
//! path resolves to, so the router clears the cache on every registration.

use crate::table::RouteMatch;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of path → match results
#[derive(Debug)]
pub struct RouteCache {
    entries: LruCache<String, Option<RouteMatch>>,
    stats: CacheStats,
}

impl RouteCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is bumped to one
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a cached resolution
    ///
    /// The outer `Option` is hit/miss; the inner one is the cached result.
    pub fn get(&mut self, path: &str) -> Option<Option<RouteMatch>> {
        if let Some(entry) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for path: '{}'", path);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for path: '{}'", path);
            None
        }
    }

    pub fn insert(&mut self, path: String, resolved: Option<RouteMatch>) {
        self.entries.push(path, resolved);
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing route cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RouteParams;
    use crate::table::RouteId;

    fn matched(index: usize) -> Option<RouteMatch> {
        Some(RouteMatch {
            route: RouteId::new(index),
            params: RouteParams::new(),
        })
    }

    #[test]
    fn test_cache_creation() {
        let cache = RouteCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), RouteCache::DEFAULT_CAPACITY);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = RouteCache::new();
        assert!(cache.get("/dashboard").is_none());
        assert_eq!(cache.stats().misses, 1);

        cache.insert("/dashboard".to_string(), matched(2));
        assert_eq!(cache.get("/dashboard"), Some(matched(2)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_negative_results_are_cached() {
        let mut cache = RouteCache::new();
        cache.insert("/nowhere".to_string(), None);

        assert_eq!(cache.get("/nowhere"), Some(None));
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = RouteCache::new();
        cache.insert("/a".to_string(), matched(0));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RouteCache::with_capacity(2);
        cache.insert("/a".to_string(), matched(0));
        cache.insert("/b".to_string(), matched(1));
        cache.get("/a");
        cache.insert("/c".to_string(), matched(2));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("/b").is_none());
        assert!(cache.get("/a").is_some());
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let cache = RouteCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = RouteCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), matched(0));
        cache.insert("/b".to_string(), None);

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);

        cache.reset_stats();
        assert_eq!(cache.stats(), &CacheStats::default());
    }
}
