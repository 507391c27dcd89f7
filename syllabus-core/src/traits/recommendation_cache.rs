use crate::models::{Recommendation, RecommendationKey};

/// Concurrent store of computed recommendations.
pub trait IRecommendationCache: Send + Sync {
    fn get(&self, key: &RecommendationKey) -> Option<Recommendation>;

    fn insert(&self, key: RecommendationKey, value: Recommendation);

    /// Number of cached entries (approximate for eventually consistent stores).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
