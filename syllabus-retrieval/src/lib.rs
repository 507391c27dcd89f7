//! # syllabus-retrieval
//!
//! `(intent, profile) -> RetrievalResult`.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine
//! ├── Strategies (IRetrievalStrategy, run in parallel, never fail)
//! │   ├── Explicit    (by_code on named and referenced codes)
//! │   ├── Structured  (department × level, filtered; emits Structured + Level)
//! │   ├── Term        (by_term)
//! │   ├── Lexical     (ILexicalRanker, bounded)
//! │   └── Semantic    (ISemanticRanker on the expanded query, bounded)
//! ├── Fusion
//! │   ├── Precedence seed (explicit > structured > text > level > term)
//! │   └── RRF (lexical ⊕ semantic)
//! ├── Ranking (rating, workload fit, concentration, missing-data bonus)
//! └── Verification (term, level, already-taken)
//! ```

pub mod backend;
pub mod engine;
pub mod expansion;
pub mod fusion;
pub mod ranking;
pub mod strategy;
pub mod verification;

pub use engine::RetrievalEngine;
pub use strategy::{IRetrievalStrategy, StrategyContext, StrategyOutput};
