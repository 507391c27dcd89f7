use serde::{Deserialize, Serialize};

use super::defaults;

/// RetrievalEngine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Fused ranking size when the query carries no "all" signal.
    pub result_cap: usize,
    /// Per-call timeout for lexical/semantic/similarity backends.
    pub backend_timeout_ms: u64,
    pub lexical_top_k: usize,
    pub semantic_top_k: usize,
    /// RRF k-value for merging the lexical and semantic lists.
    pub rrf_k: u32,
    pub rating_weight: f64,
    pub preference_weight: f64,
    pub concentration_bonus: f64,
    /// Flat bonus for courses without workload data.
    pub missing_data_bonus: f64,
    pub workload_saturation_hours: f64,
    pub lexical_confidence: f64,
    pub semantic_confidence: f64,
    /// Run strategies on the rayon pool.
    pub parallel_strategies: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            result_cap: defaults::DEFAULT_RESULT_CAP,
            backend_timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
            lexical_top_k: defaults::DEFAULT_LEXICAL_TOP_K,
            semantic_top_k: defaults::DEFAULT_SEMANTIC_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            rating_weight: defaults::DEFAULT_RATING_WEIGHT,
            preference_weight: defaults::DEFAULT_PREFERENCE_WEIGHT,
            concentration_bonus: defaults::DEFAULT_CONCENTRATION_BONUS,
            missing_data_bonus: defaults::DEFAULT_MISSING_DATA_BONUS,
            workload_saturation_hours: defaults::DEFAULT_WORKLOAD_SATURATION_HOURS,
            lexical_confidence: defaults::DEFAULT_LEXICAL_CONFIDENCE,
            semantic_confidence: defaults::DEFAULT_SEMANTIC_CONFIDENCE,
            parallel_strategies: defaults::DEFAULT_PARALLEL_STRATEGIES,
        }
    }
}
