//! Error handling for Syllabus.
//! One error enum per subsystem, `thiserror` only.

pub mod backend_error;
pub mod config_error;
pub mod index_error;

pub use backend_error::BackendError;
pub use config_error::ConfigError;
pub use index_error::IndexError;

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SyllabusError {
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SyllabusResult<T> = Result<T, SyllabusError>;
