use serde::{Deserialize, Serialize};

use super::defaults;

/// RecommendationEngine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub top_n: usize,
    /// Length of the workload-friendly and highly-rated lists.
    pub derived_list_len: usize,
    /// How many top picks get alternatives.
    pub alternatives_for_top: usize,
    pub alternatives_per_course: usize,
    /// Per-call timeout for the similarity and text-fallback backends.
    pub backend_timeout_ms: u64,
    pub relax_hours_factor: f64,
    pub relax_score_factor: f64,
    pub relax_score_floor: f64,
    /// Fewer recommendations than this is flagged.
    pub min_results: usize,
    /// Overall confidence below this is flagged.
    pub low_confidence: f64,
    pub cache_capacity: u64,
    /// Optional expiry for the shared cache. `None` keeps entries until eviction.
    pub cache_ttl_secs: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_n: defaults::DEFAULT_TOP_N,
            derived_list_len: defaults::DEFAULT_DERIVED_LIST_LEN,
            alternatives_for_top: defaults::DEFAULT_ALTERNATIVES_FOR_TOP,
            alternatives_per_course: defaults::DEFAULT_ALTERNATIVES_PER_COURSE,
            backend_timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
            relax_hours_factor: defaults::DEFAULT_RELAX_HOURS_FACTOR,
            relax_score_factor: defaults::DEFAULT_RELAX_SCORE_FACTOR,
            relax_score_floor: defaults::DEFAULT_RELAX_SCORE_FLOOR,
            min_results: defaults::DEFAULT_MIN_RESULTS,
            low_confidence: defaults::DEFAULT_LOW_CONFIDENCE,
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: None,
        }
    }
}
