//! Capability traits implemented by external collaborators.

pub mod lexical_ranker;
pub mod recommendation_cache;
pub mod semantic_ranker;
pub mod similar_courses;

pub use lexical_ranker::ILexicalRanker;
pub use recommendation_cache::IRecommendationCache;
pub use semantic_ranker::ISemanticRanker;
pub use similar_courses::ISimilarCourses;
