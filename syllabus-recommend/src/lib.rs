//! # syllabus-recommend
//!
//! `(intent, profile, [retrieval]) -> Recommendation`.
//!
//! ## Architecture
//!
//! ```text
//! RecommendationEngine
//! ├── Cache (IRecommendationCache: DashMap or moka)
//! ├── Candidates (department > concentration > text > profile)
//! │   └── Relaxation (hours ×1.5, score ×0.8, drop, widen levels, unfiltered text)
//! ├── Scoring (rating 50, workload 30, concentration 10, aspect bonuses)
//! ├── Lists (top 5, workload-friendly 3, highly-rated 3)
//! ├── Reasons (rating, workload, term, level, concentration, prerequisites, comments)
//! ├── Alternatives (ISimilarCourses, bounded)
//! └── Reflection
//! ```

pub mod alternatives;
pub mod cache;
pub mod candidates;
pub mod engine;
pub mod reasons;
pub mod reflection;
pub mod relaxation;
pub mod scoring;

pub use cache::{InMemoryRecommendationCache, SharedRecommendationCache};
pub use engine::RecommendationEngine;
