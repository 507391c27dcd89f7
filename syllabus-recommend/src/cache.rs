//! Recommendation caches behind [`IRecommendationCache`].
//!
//! Entries live for the process lifetime unless a TTL is configured.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use moka::sync::Cache;
use syllabus_core::config::RecommendationConfig;
use syllabus_core::models::RecommendationKey;
use syllabus_core::traits::IRecommendationCache;
use syllabus_core::Recommendation;

/// Unbounded map. Used in tests and short-lived processes.
#[derive(Default)]
pub struct InMemoryRecommendationCache {
    entries: DashMap<RecommendationKey, Recommendation>,
}

impl InMemoryRecommendationCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IRecommendationCache for InMemoryRecommendationCache {
    fn get(&self, key: &RecommendationKey) -> Option<Recommendation> {
        self.entries.get(key).map(|r| r.clone())
    }

    fn insert(&self, key: RecommendationKey, value: Recommendation) {
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Bounded cache with TinyLFU eviction, optional TTL and hit/miss counters.
pub struct SharedRecommendationCache {
    cache: Cache<RecommendationKey, Recommendation>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SharedRecommendationCache {
    pub fn new(max_entries: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_entries);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &RecommendationConfig) -> Self {
        Self::new(
            config.cache_capacity,
            config.cache_ttl_secs.map(Duration::from_secs),
        )
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups served from the cache. Zero before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl IRecommendationCache for SharedRecommendationCache {
    fn get(&self, key: &RecommendationKey) -> Option<Recommendation> {
        let found = self.cache.get(key);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    fn insert(&self, key: RecommendationKey, value: Recommendation) {
        self.cache.insert(key, value);
    }

    fn len(&self) -> usize {
        usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{QueryIntent, StudentProfile};

    fn key(raw: &str, dept: &str) -> RecommendationKey {
        let mut intent = QueryIntent::new(raw);
        intent.departments.insert(dept.into());
        RecommendationKey::from_request(&intent, &StudentProfile::default())
    }

    #[test]
    fn in_memory_round_trip() {
        let cache = InMemoryRecommendationCache::new();
        assert!(cache.get(&key("x", "MATH")).is_none());
        cache.insert(key("x", "MATH"), Recommendation::skipped("why"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("  X ", "MATH")).is_some());
        assert!(cache.get(&key("different words", "MATH")).is_none());
        assert!(cache.get(&key("x", "STAT")).is_none());
    }

    #[test]
    fn shared_counts_hits_and_misses() {
        let cache = SharedRecommendationCache::new(10, None);
        assert!(cache.get(&key("x", "MATH")).is_none());
        cache.insert(key("x", "MATH"), Recommendation::empty());
        assert!(cache.get(&key("x", "MATH")).is_some());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn clear_drops_entries() {
        let cache = SharedRecommendationCache::from_config(&RecommendationConfig::default());
        cache.insert(key("x", "MATH"), Recommendation::empty());
        cache.clear();
        assert!(cache.get(&key("x", "MATH")).is_none());
    }
}
