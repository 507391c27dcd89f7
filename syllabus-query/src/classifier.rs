//! Intent classification from weighted lexical cues.

use std::sync::LazyLock;

use syllabus_core::{Confidence, IntentKind};

use crate::rules::{compile, fired, Rule};

use IntentKind::{Comparison, CourseInfo, Recommendation, Requirements, SchedulePlanning};

const INTENT_TABLE: &[(&str, IntentKind, f64)] = &[
    // Recommendation
    (r"\brecommend", Recommendation, 0.9),
    (r"\bsuggest", Recommendation, 0.9),
    (r"\bbest\b", Recommendation, 0.8),
    (r"\bgood\b", Recommendation, 0.7),
    (r"\bappropriate\b", Recommendation, 0.7),
    (r"\bwhat should\b", Recommendation, 0.8),
    (r"\bwhich (course|class)", Recommendation, 0.85),
    (r"\badvi[sc]e\b", Recommendation, 0.9),
    (r"\beasy\b", Recommendation, 0.6),
    (r"\btake\b", Recommendation, 0.75),
    (r"\boptions\b", Recommendation, 0.7),
    (r"\balternatives\b", Recommendation, 0.7),
    (r"\bchill(est)?\b", Recommendation, 0.85),
    (r"\bmanageable\b", Recommendation, 0.75),
    (r"\binteresting\b", Recommendation, 0.6),
    (r"\bfun\b", Recommendation, 0.6),
    (r"\b(something|anything|one|ones)\s+(easier|harder|lighter|else|similar)\b", Recommendation, 0.8),
    // Course information
    (r"\bwhat is\b", CourseInfo, 0.7),
    (r"\btell me about\b", CourseInfo, 0.85),
    (r"\bdetails\b", CourseInfo, 0.8),
    (r"\binformation about\b", CourseInfo, 0.9),
    (r"\bdescribe\b", CourseInfo, 0.85),
    (r"\bexplain\b", CourseInfo, 0.8),
    (r"\blearn about\b", CourseInfo, 0.75),
    (r"\bsyllabus\b", CourseInfo, 0.9),
    (r"\bprofessor\b", CourseInfo, 0.7),
    (r"\binstructor\b", CourseInfo, 0.7),
    (r"\btaught by\b", CourseInfo, 0.8),
    (r"\breading\b", CourseInfo, 0.6),
    (r"\btopics\b", CourseInfo, 0.7),
    (r"\bassignments\b", CourseInfo, 0.8),
    (r"\bprerequisites?\b", CourseInfo, 0.8),
    // Requirements
    (r"\brequirements?\b", Requirements, 0.9),
    (r"\brequired\b", Requirements, 0.9),
    (r"\bneed to take\b", Requirements, 0.85),
    (r"\bhave to take\b", Requirements, 0.85),
    (r"\bfulfill", Requirements, 0.8),
    (r"\bsatisfy\b", Requirements, 0.8),
    (r"\bcomplete\b", Requirements, 0.7),
    (r"\bconcentration\b", Requirements, 0.75),
    (r"\bmajor\b", Requirements, 0.75),
    (r"\bminor\b", Requirements, 0.75),
    (r"\bdegree\b", Requirements, 0.8),
    (r"\bprogram\b", Requirements, 0.7),
    (r"\bgraduat(e|ion)\b", Requirements, 0.8),
    (r"\bcredits?\b", Requirements, 0.75),
    // Comparison
    (r"\bcompare\b", Comparison, 0.9),
    (r"\bdifference\b", Comparison, 0.85),
    (r"\bbetter\b", Comparison, 0.8),
    (r"\b(easier|harder) than\b", Comparison, 0.8),
    (r"\bversus\b", Comparison, 0.9),
    (r"\bvs\.?(\s|$)", Comparison, 0.9),
    (r"\bor\b", Comparison, 0.6),
    (r"\bsimilar\b", Comparison, 0.7),
    (r"\bbetween\b", Comparison, 0.8),
    // Schedule planning
    (r"\bschedule\b", SchedulePlanning, 0.85),
    (r"\btimetable\b", SchedulePlanning, 0.85),
    (r"\bconflicts?\b", SchedulePlanning, 0.8),
    (r"\boverlapping\b", SchedulePlanning, 0.8),
    (r"\btime\b", SchedulePlanning, 0.6),
    (r"\bsemester plan\b", SchedulePlanning, 0.9),
    (r"\bcourse ?load\b", SchedulePlanning, 0.85),
    (r"\bworkload\b", SchedulePlanning, 0.8),
    (r"\bbalance\b", SchedulePlanning, 0.7),
    (r"\bfit\b", SchedulePlanning, 0.6),
];

static INTENT_RULES: LazyLock<Vec<Rule<IntentKind>>> = LazyLock::new(|| compile(INTENT_TABLE));

/// Confidence for "a course code and nothing else".
const CODE_ONLY_CONFIDENCE: f64 = 0.7;
/// Boost when a code appears next to a recommendation cue.
const CODE_RECOMMENDATION_BOOST: f64 = 0.2;

/// Scores for one query, in [`IntentKind::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentScores(pub Vec<(IntentKind, f64)>);

impl IntentScores {
    fn get(&self, kind: IntentKind) -> f64 {
        self.0
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }

    fn set(&mut self, kind: IntentKind, score: f64) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = score;
        }
    }
}

/// Per-kind maximum cue weight.
pub fn score(lower: &str) -> IntentScores {
    let mut scores = IntentScores(IntentKind::ALL.iter().map(|k| (*k, 0.0)).collect());
    for rule in fired(&INTENT_RULES, lower) {
        let current = scores.get(rule.value);
        scores.set(rule.value, current.max(rule.confidence));
    }
    scores
}

/// Classify `lower` into an intent kind.
///
/// `mentions_code` is whether a course code was extracted from the query.
/// Returns `None` when no cue fired, so the caller can fall back.
pub fn classify(lower: &str, mentions_code: bool) -> Option<(IntentKind, Confidence)> {
    let mut scores = score(lower);
    let any_cue = scores.0.iter().any(|(_, s)| *s > 0.0);

    if mentions_code {
        if !any_cue {
            scores.set(CourseInfo, CODE_ONLY_CONFIDENCE);
        } else if scores.get(Recommendation) > 0.0 {
            let boosted = scores.get(Recommendation) + CODE_RECOMMENDATION_BOOST;
            scores.set(Recommendation, boosted);
        }
    }

    // Highest score wins; equal scores go to the more specific kind.
    scores
        .0
        .iter()
        .filter(|(_, s)| *s > 0.0)
        .max_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.specificity().cmp(&b.0.specificity()))
        })
        .map(|(k, s)| (*k, Confidence::new(*s)))
}
