pub mod alias_config;
pub mod defaults;
pub mod interpreter_config;
pub mod recommendation_config;
pub mod retrieval_config;
pub mod syllabus_config;

pub use alias_config::AliasConfig;
pub use interpreter_config::InterpreterConfig;
pub use recommendation_config::RecommendationConfig;
pub use retrieval_config::RetrievalConfig;
pub use syllabus_config::SyllabusConfig;
