//! Numeric workload and rating constraints.
//!
//! Explicit numbers win. Qualitative phrases ("chill", "well-rated") only
//! fill a bound that no number set, using the configured policy values.

use std::sync::LazyLock;

use syllabus_core::config::InterpreterConfig;
use syllabus_core::models::Constraints;
use syllabus_core::Confidence;

use super::Spans;
use crate::rules::{compile, Rule};

const HOURS_TABLE: &[(&str, (), f64)] = &[
    (r"(?:less than|no more than|maximum|max) (\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.9),
    (r"[<≤] ?(\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.9),
    (r"\bunder (\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.85),
    (r"\b(\d+(?:\.\d+)?) (?:hours|hrs) or less\b", (), 0.85),
    (r"\bnot more than (\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.85),
    (r"\bat most (\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.85),
    (r"\bfewer than (\d+(?:\.\d+)?) (?:hours|hrs)", (), 0.85),
];

const SCORE_TABLE: &[(&str, (), f64)] = &[
    (r"(?:at least|minimum) (\d(?:\.\d+)?) (?:rating|score)", (), 0.9),
    (r"[>≥] ?(\d(?:\.\d+)?) (?:rating|score)", (), 0.9),
    (r"(?:rating|score) (?:above|higher than) (\d(?:\.\d+)?)", (), 0.85),
    (r"(?:rating|score) (?:of )?(?:at least )?(\d(?:\.\d+)?)", (), 0.8),
    (r"better than (\d(?:\.\d+)?) (?:rating|score)", (), 0.8),
];

const EASY_TABLE: &[(&str, (), f64)] = &[
    (r"\b(easy|easiest|light workload|manageable)\b", (), 0.8),
    (r"\bnot too (much|hard|difficult)\b", (), 0.75),
    (r"\bdon'?t want to spend too much time\b", (), 0.75),
    (r"\blow commitment\b", (), 0.7),
    (r"\bless work\b", (), 0.7),
    (r"\bminimal effort\b", (), 0.75),
    (r"\b(chill|chillest)\b", (), 0.85),
];

const WELL_RATED_TABLE: &[(&str, (), f64)] = &[
    (r"\b(good|great|excellent|high) (rating|ratings|score|reviews)\b", (), 0.8),
    (r"\bwell[- ]rated\b", (), 0.8),
    (r"\bhighly[- ]rated\b", (), 0.85),
    (r"\btop[- ]rated\b", (), 0.85),
    (r"\bgood q score\b", (), 0.85),
    (r"\bpeople like\b", (), 0.7),
    (r"\bwell[- ]reviewed\b", (), 0.8),
];

static HOURS_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(HOURS_TABLE));
static SCORE_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(SCORE_TABLE));
static EASY_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(EASY_TABLE));
static WELL_RATED_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(WELL_RATED_TABLE));

/// Ratings live on a 0–5 scale.
const MAX_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintExtraction {
    pub constraints: Constraints,
    pub confidence: Confidence,
}

/// First rule (table order) whose number parses, claiming its span.
fn first_number(
    rules: &[Rule<()>],
    lower: &str,
    spans: &mut Spans,
    accept: impl Fn(f64) -> bool,
) -> Option<(f64, Confidence)> {
    for rule in rules {
        for caps in rule.regex.captures_iter(lower) {
            let (Some(whole), Some(num)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Ok(value) = num.as_str().parse::<f64>() else {
                continue;
            };
            if !accept(value) {
                continue;
            }
            spans.claim(whole.range());
            return Some((value, Confidence::new(rule.confidence)));
        }
    }
    None
}

fn strongest(rules: &[Rule<()>], lower: &str) -> Option<Confidence> {
    rules
        .iter()
        .filter(|r| r.regex.is_match(lower))
        .map(|r| Confidence::new(r.confidence))
        .reduce(Confidence::or)
}

pub fn extract(lower: &str, spans: &mut Spans, config: &InterpreterConfig) -> ConstraintExtraction {
    let mut out = ConstraintExtraction::default();

    if let Some((hours, c)) = first_number(&HOURS_RULES, lower, spans, |h| h >= 0.0) {
        out.constraints.max_hours = Some(hours);
        out.confidence = out.confidence.or(c);
    }
    if let Some((score, c)) = first_number(&SCORE_RULES, lower, spans, |s| (0.0..=MAX_SCORE).contains(&s)) {
        out.constraints.min_score = Some(score);
        out.confidence = out.confidence.or(c);
    }

    if out.constraints.max_hours.is_none() {
        if let Some(c) = strongest(&EASY_RULES, lower) {
            out.constraints.max_hours = Some(config.easy_max_hours);
            out.confidence = out.confidence.or(c);
        }
    }
    if out.constraints.min_score.is_none() {
        if let Some(c) = strongest(&WELL_RATED_RULES, lower) {
            out.constraints.min_score = Some(config.well_rated_min_score);
            out.confidence = out.confidence.or(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(text: &str) -> ConstraintExtraction {
        extract(text, &mut Spans::default(), &InterpreterConfig::default())
    }

    #[test]
    fn explicit_hours() {
        let c = constraints("something under 8 hours a week");
        assert_eq!(c.constraints.max_hours, Some(8.0));
        assert_eq!(c.confidence.value(), 0.85);
    }

    #[test]
    fn explicit_score() {
        let c = constraints("rating above 4.2");
        assert_eq!(c.constraints.min_score, Some(4.2));
    }

    #[test]
    fn out_of_scale_score_is_ignored() {
        assert_eq!(constraints("rating of 7").constraints.min_score, None);
    }

    #[test]
    fn policy_chill_defaults_to_configured_hours() {
        let c = constraints("a chill class");
        assert_eq!(c.constraints.max_hours, Some(10.0));
        assert_eq!(c.confidence.value(), 0.85);
    }

    #[test]
    fn explicit_number_beats_qualitative_phrase() {
        let c = constraints("easy, less than 6 hours");
        assert_eq!(c.constraints.max_hours, Some(6.0));
    }

    #[test]
    fn policy_well_rated_uses_configured_score() {
        let config = InterpreterConfig {
            well_rated_min_score: 4.3,
            ..Default::default()
        };
        let c = extract("well-rated seminars", &mut Spans::default(), &config);
        assert_eq!(c.constraints.min_score, Some(4.3));
    }

    #[test]
    fn no_constraints() {
        let c = constraints("intro cs");
        assert!(c.constraints.is_empty());
        assert_eq!(c.confidence, Confidence::NONE);
    }
}
