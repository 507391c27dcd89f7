/// Errors from external ranking and similarity capabilities.
///
/// Engines never propagate these; they become "no results, confidence 0".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {backend}")]
    Unavailable { backend: String },

    #[error("backend {backend} timed out after {timeout_ms}ms")]
    TimedOut { backend: String, timeout_ms: u64 },

    #[error("backend {backend} failed: {reason}")]
    Failed { backend: String, reason: String },
}

impl BackendError {
    /// Name of the backend that produced the error.
    pub fn backend(&self) -> &str {
        match self {
            Self::Unavailable { backend }
            | Self::TimedOut { backend, .. }
            | Self::Failed { backend, .. } => backend,
        }
    }
}
