//! Follow-up detection: referential cues, short utterances, and codes
//! carried over from the last assistant turn.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use syllabus_core::Confidence;

use crate::rules::{compile, fired, Rule};

const FOLLOWUP_TABLE: &[(&str, (), f64)] = &[
    (r"\bit\b", (), 0.6),
    (r"\bthat\b", (), 0.7),
    (r"\bthose\b", (), 0.75),
    (r"\bthis\b", (), 0.65),
    (r"\bthe course\b", (), 0.8),
    (r"\bcompare\b", (), 0.7),
    (r"\bbetween\b", (), 0.6),
    (r"\binstead\b", (), 0.75),
    (r"^\s*what about\b", (), 0.9),
    (r"^\s*how about\b", (), 0.9),
    (r"\balso\b", (), 0.6),
    (r"\btoo\b", (), 0.6),
    (r"\banother\b", (), 0.7),
    (r"\bsimilar\b", (), 0.65),
    (r"\balternatives?\b", (), 0.8),
];

static FOLLOWUP_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(FOLLOWUP_TABLE));

/// Utterances up to this many words count as likely follow-ups.
const SHORT_UTTERANCE_WORDS: usize = 5;
const CARRIED_CODE_CONFIDENCE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowupSignal {
    pub is_followup: bool,
    pub confidence: Confidence,
}

impl FollowupSignal {
    pub const NONE: FollowupSignal = FollowupSignal {
        is_followup: false,
        confidence: Confidence::NONE,
    };
}

/// Confidence is the maximum weight among triggered signals.
///
/// Without any conversation context (`has_context == false`) nothing can be
/// a follow-up.
pub fn detect(
    lower: &str,
    query_codes: &BTreeSet<String>,
    last_assistant_codes: &BTreeSet<String>,
    has_context: bool,
) -> FollowupSignal {
    if !has_context {
        return FollowupSignal::NONE;
    }

    let mut confidence = fired(&FOLLOWUP_RULES, lower)
        .map(|r| Confidence::new(r.confidence))
        .fold(Confidence::NONE, Confidence::or);

    let words = lower.split_whitespace().count();
    if words > 0 && words <= SHORT_UTTERANCE_WORDS {
        let shortness = 0.5 + 0.1 * (SHORT_UTTERANCE_WORDS - words) as f64;
        confidence = confidence.or(Confidence::new(shortness));
    }

    if query_codes.iter().any(|c| last_assistant_codes.contains(c)) {
        confidence = confidence.or(Confidence::new(CARRIED_CODE_CONFIDENCE));
    }

    FollowupSignal {
        is_followup: confidence.value() > 0.0,
        confidence,
    }
}
