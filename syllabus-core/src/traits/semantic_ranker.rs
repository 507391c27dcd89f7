use crate::errors::BackendError;
use crate::models::Course;

/// Embedding-similarity ranking over course text.
pub trait ISemanticRanker: Send + Sync {
    /// Up to `top_k` courses, most similar first.
    fn rank(&self, query: &str, top_k: usize) -> Result<Vec<Course>, BackendError>;

    /// Backend name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the backend can serve requests right now.
    fn is_available(&self) -> bool {
        true
    }
}
