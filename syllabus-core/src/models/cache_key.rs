use std::collections::BTreeSet;

use super::intent::{IntentField, LevelRange, QueryIntent, SemanticAspects};
use super::profile::StudentProfile;

/// Structured, hashable key for recommendation caching.
///
/// Floats are stored as their bit patterns so the key can be `Eq + Hash`.
/// Holds everything a recommendation reads from the request: the text sources
/// rank the query text, so two requests share an entry only when their text
/// matches up to case and spacing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecommendationKey {
    /// Lowercased raw text with whitespace collapsed.
    pub text: String,
    pub course_codes: BTreeSet<String>,
    pub departments: BTreeSet<String>,
    pub levels: Vec<LevelRange>,
    pub terms: BTreeSet<String>,
    pub max_hours_bits: Option<u64>,
    pub min_score_bits: Option<u64>,
    pub preferences: BTreeSet<String>,
    pub aspects: SemanticAspects,
    /// Confidences that feed the candidate and overall scores.
    pub confidence_bits: Vec<(IntentField, u64)>,
    pub concentration: Option<String>,
    pub taken_count: usize,
    /// Uppercased taken codes. Two profiles with the same count but different
    /// courses must not share an entry.
    pub taken: BTreeSet<String>,
    /// Lowercased profile interests; they add scoring bonuses.
    pub interests: BTreeSet<String>,
}

/// Fields whose confidence a recommendation reads.
const KEYED_CONFIDENCES: [IntentField; 3] = [
    IntentField::Intent,
    IntentField::Departments,
    IntentField::LevelRanges,
];

impl RecommendationKey {
    pub fn from_request(intent: &QueryIntent, profile: &StudentProfile) -> Self {
        let mut levels = intent.level_ranges.clone();
        levels.sort();
        levels.dedup();
        Self {
            text: intent
                .raw_text
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
            course_codes: intent.course_codes.clone(),
            departments: intent.departments.clone(),
            levels,
            terms: intent.terms.iter().map(|t| t.to_lowercase()).collect(),
            max_hours_bits: intent.constraints.max_hours.map(f64::to_bits),
            min_score_bits: intent.constraints.min_score.map(f64::to_bits),
            preferences: intent.preferences.clone(),
            aspects: intent.aspects,
            confidence_bits: KEYED_CONFIDENCES
                .iter()
                .map(|f| (*f, intent.confidence_of(*f).value().to_bits()))
                .collect(),
            concentration: profile.concentration.as_ref().map(|c| c.to_lowercase()),
            taken_count: profile.courses_taken.len(),
            taken: profile
                .courses_taken
                .iter()
                .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase())
                .collect(),
            interests: profile
                .interests
                .iter()
                .map(|i| i.trim().to_lowercase())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}
