//! Records passed between the interpreter, retrieval, and recommendation stages.

pub mod cache_key;
pub mod course;
pub mod intent;
pub mod profile;
pub mod recommendation;
pub mod retrieval_result;
pub mod turn;

pub use cache_key::RecommendationKey;
pub use course::{Concentration, Course};
pub use intent::{
    Constraints, Difficulty, Format, IntentField, IntentKind, InterestLevel, LevelRange,
    QueryIntent, Reflection, Relevance, SemanticAspects,
};
pub use profile::StudentProfile;
pub use recommendation::{Alternative, Recommendation};
pub use retrieval_result::{Bucket, RetrievalResult};
pub use turn::{ChatTurn, Role};
