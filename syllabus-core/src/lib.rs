//! # syllabus-core
//!
//! Foundation crate for the Syllabus course engine.
//! Defines the records passed between stages, the confidence policy,
//! capability traits, errors, config, and defaults.
//! Every other crate in the workspace depends on this.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use confidence::{Confidence, Penalty};
pub use config::SyllabusConfig;
pub use errors::{SyllabusError, SyllabusResult};
pub use models::{
    Bucket, Course, IntentField, IntentKind, LevelRange, QueryIntent, Recommendation,
    RetrievalResult, StudentProfile,
};
