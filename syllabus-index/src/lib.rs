//! # syllabus-index
//!
//! The normalized course table and its lookup structures. Built once from
//! ingested rows, then read concurrently without locks.

pub mod alias;
pub mod index;
pub mod lexical;
pub mod normalize;
pub mod record;
pub mod similar;

pub use index::{BuildStats, Catalog, CourseIndex};
pub use lexical::KeywordRanker;
pub use normalize::{normalize_code, parse_code, ParsedCode};
pub use record::CourseRecord;
pub use similar::SameLevelSimilarity;
