use crate::errors::BackendError;
use crate::models::Course;

/// Keyword-relevance ranking over course text.
pub trait ILexicalRanker: Send + Sync {
    /// Up to `top_k` courses, most relevant first.
    fn rank(&self, query: &str, top_k: usize) -> Result<Vec<Course>, BackendError>;

    /// Backend name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the backend can serve requests right now.
    fn is_available(&self) -> bool {
        true
    }
}
