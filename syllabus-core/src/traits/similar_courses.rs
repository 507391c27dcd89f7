use crate::errors::BackendError;
use crate::models::Course;

/// Nearest-neighbor lookup used for recommendation alternatives.
pub trait ISimilarCourses: Send + Sync {
    /// Up to `top_k` courses similar to `code`, never including `code` itself.
    fn similar_to(&self, code: &str, top_k: usize) -> Result<Vec<Course>, BackendError>;

    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }
}
