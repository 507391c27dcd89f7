use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::course::Course;
use crate::constants::SCHEMA_VERSION;

/// Named candidate lists produced by the retrieval strategies.
///
/// `Structured` holds courses passing every stated filter; `Level` holds the
/// raw department/level-range matches the structured strategy found on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Explicit,
    Structured,
    Level,
    Term,
    Lexical,
    Semantic,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Self::Explicit,
        Self::Structured,
        Self::Level,
        Self::Term,
        Self::Lexical,
        Self::Semantic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Structured => "structured",
            Self::Level => "level",
            Self::Term => "term",
            Self::Lexical => "lexical",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one retrieval pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub schema_version: u32,
    pub buckets: BTreeMap<Bucket, Vec<Course>>,
    /// Deduplicated, ranked subset of the union of all buckets.
    pub fused_ranking: Vec<Course>,
    pub confidence: BTreeMap<Bucket, f64>,
    /// Which strategies fired and why, in pipeline order.
    pub explanation: Vec<String>,
    /// Detected mismatches between the ranking and the request.
    pub verification: Vec<String>,
}

impl RetrievalResult {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            buckets: BTreeMap::new(),
            fused_ranking: Vec::new(),
            confidence: BTreeMap::new(),
            explanation: Vec::new(),
            verification: Vec::new(),
        }
    }

    /// Courses in `bucket` (empty when the strategy found nothing).
    pub fn bucket(&self, bucket: Bucket) -> &[Course] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn confidence_of(&self, bucket: Bucket) -> f64 {
        self.confidence.get(&bucket).copied().unwrap_or(0.0)
    }
}

impl Default for RetrievalResult {
    fn default() -> Self {
        Self::empty()
    }
}
