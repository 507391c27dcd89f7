//! Ranking: score → stable sort → cap.

pub mod scorer;

use std::sync::LazyLock;

use regex::Regex;
use syllabus_core::config::RetrievalConfig;
use syllabus_core::{Course, QueryIntent, StudentProfile};
use syllabus_index::CourseIndex;

use scorer::{ScoredCourse, ScorerWeights};

static ALL_SIGNAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(all|every|list all)\b").ok());

/// Whether the query asks for an uncapped listing.
pub fn wants_all(raw_text: &str) -> bool {
    ALL_SIGNAL
        .as_ref()
        .is_some_and(|re| re.is_match(&raw_text.to_ascii_lowercase()))
}

/// Scores the fused working set and truncates it.
pub struct RankingPipeline {
    weights: ScorerWeights,
    cap: usize,
}

impl RankingPipeline {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            weights: ScorerWeights::from(config),
            cap: config.result_cap,
        }
    }

    /// Rank `candidates` for `intent`. Equal scores keep candidate order.
    pub fn rank(
        &self,
        candidates: Vec<Course>,
        intent: &QueryIntent,
        profile: &StudentProfile,
        index: &CourseIndex,
    ) -> Vec<ScoredCourse> {
        let concentration_codes = profile
            .concentration
            .as_deref()
            .map(|c| index.by_department_alias(c))
            .unwrap_or_default();

        let mut scored = scorer::score(candidates, intent, &concentration_codes, &self.weights);
        if !wants_all(&intent.raw_text) {
            scored.truncate(self.cap);
        }
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_signal_needs_a_whole_word() {
        assert!(wants_all("List all MATH courses"));
        assert!(wants_all("every stat class"));
        assert!(!wants_all("small classes"));
        assert!(!wants_all("a math class"));
    }
}
