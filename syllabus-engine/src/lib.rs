//! # syllabus-engine
//!
//! One entry point over the whole pipeline. Owns the shared [`CourseIndex`],
//! the three stage engines and the recommendation cache.
//!
//! ## Architecture
//!
//! ```text
//! CourseEngine
//! ├── QueryInterpreter      interpret(raw, recent_turns, previous)
//! ├── RetrievalEngine       retrieve(intent, profile)
//! ├── RecommendationEngine  recommend(intent, profile, retrieval)
//! │   └── SharedRecommendationCache (moka)
//! ├── AnswerContext         structured sections for the answerer
//! └── tracing_setup         SYLLABUS_LOG subscriber
//! ```
//!
//! [`CourseIndex`]: syllabus_index::CourseIndex

pub mod context;
pub mod engine;
pub mod tracing_setup;

pub use context::{AnswerContext, ContextSection};
pub use engine::{Collaborators, CourseEngine, EngineTurn};
