use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::course::Course;
use crate::constants::SCHEMA_VERSION;

/// A fallback course offered in place of a recommended one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub course: Course,
    pub replaces_code: String,
    pub reason: String,
    pub detail_reasons: Vec<String>,
}

/// Profile-aware recommendation set for one turn. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub schema_version: u32,
    /// Set when the engine declined to recommend (wrong intent kind).
    pub skipped: bool,
    pub top: Vec<Course>,
    pub workload_friendly: Vec<Course>,
    pub highly_rated: Vec<Course>,
    pub reasons: BTreeMap<String, Vec<String>>,
    pub alternatives: Vec<Alternative>,
    pub self_reflection: Vec<String>,
    pub confidence: BTreeMap<String, f64>,
}

impl Recommendation {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            skipped: false,
            top: Vec::new(),
            workload_friendly: Vec::new(),
            highly_rated: Vec::new(),
            reasons: BTreeMap::new(),
            alternatives: Vec::new(),
            self_reflection: Vec::new(),
            confidence: BTreeMap::new(),
        }
    }

    /// An empty result flagged as skipped, carrying the reason.
    pub fn skipped(reason: impl Into<String>) -> Self {
        let mut rec = Self::empty();
        rec.skipped = true;
        rec.self_reflection.push(reason.into());
        rec
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Self::empty()
    }
}
