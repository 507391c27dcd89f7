//! Term mentions: seasons, relative phrases, years and `F23`-style shorthand.

use std::sync::LazyLock;

use syllabus_core::config::InterpreterConfig;
use syllabus_core::Confidence;

use super::{Extraction, Spans};
use crate::rules::{compile, Rule};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TermSource {
    Season(&'static str),
    Current,
    Next,
}

const TERM_TABLE: &[(&str, TermSource, f64)] = &[
    (r"\bnext (semester|term)\b", TermSource::Next, 0.8),
    (r"\b(this|current) (semester|term)\b", TermSource::Current, 0.75),
    (r"\bupcoming\b", TermSource::Next, 0.6),
    (r"\b(fall|autumn)\b", TermSource::Season("Fall"), 0.9),
    (r"\bspring\b", TermSource::Season("Spring"), 0.9),
    (r"\bsummer\b", TermSource::Season("Summer"), 0.9),
    (r"\bwinter\b", TermSource::Season("Winter"), 0.9),
];

static TERM_RULES: LazyLock<Vec<Rule<TermSource>>> = LazyLock::new(|| compile(TERM_TABLE));

const SHORTHAND_TABLE: &[(&str, &str, f64)] = &[
    (r"\bf(\d{2})\b", "Fall", 0.85),
    (r"\bs(\d{2})\b", "Spring", 0.85),
];

static SHORTHAND_RULES: LazyLock<Vec<Rule<&'static str>>> =
    LazyLock::new(|| compile(SHORTHAND_TABLE));

static YEAR_RULES: LazyLock<Vec<Rule<()>>> =
    LazyLock::new(|| compile(&[(r"\b(20\d{2})\b", (), 0.9)]));

/// A bare year with no season.
const YEAR_ONLY_CONFIDENCE: f64 = 0.6;

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Terms in `lower`, as stored-term fragments (`"Fall"`, `"Fall 2025"`, `"2025"`).
pub fn extract(lower: &str, spans: &mut Spans, config: &InterpreterConfig) -> Extraction<String> {
    let mut out = Extraction::empty();

    let mut seasons: Vec<String> = Vec::new();
    let mut season_confidence = Confidence::NONE;
    for rule in TERM_RULES.iter() {
        for m in rule.regex.find_iter(lower) {
            if spans.overlaps(&m.range()) {
                continue;
            }
            spans.claim(m.range());
            let season = match rule.value {
                TermSource::Season(s) => s.to_string(),
                TermSource::Current => config.current_season.clone(),
                TermSource::Next => config.next_season.clone(),
            };
            push_unique(&mut seasons, season);
            season_confidence = season_confidence.or(Confidence::new(rule.confidence));
        }
    }

    let mut years: Vec<String> = Vec::new();
    let mut year_confidence = Confidence::NONE;
    for rule in YEAR_RULES.iter() {
        for caps in rule.regex.captures_iter(lower) {
            let (Some(whole), Some(year)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if spans.overlaps(&whole.range()) {
                continue;
            }
            spans.claim(whole.range());
            push_unique(&mut years, year.as_str().to_string());
            year_confidence = year_confidence.or(Confidence::new(rule.confidence));
        }
    }

    match (seasons.is_empty(), years.is_empty()) {
        (false, false) => {
            for season in &seasons {
                for year in &years {
                    push_unique(&mut out.values, format!("{season} {year}"));
                }
            }
            out.confidence = season_confidence.and(year_confidence);
        }
        (false, true) => {
            out.values = seasons;
            out.confidence = season_confidence;
        }
        (true, false) => {
            out.values = years;
            out.confidence = Confidence::new(YEAR_ONLY_CONFIDENCE);
        }
        (true, true) => {}
    }

    for rule in SHORTHAND_RULES.iter() {
        for caps in rule.regex.captures_iter(lower) {
            let (Some(whole), Some(yy)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if spans.overlaps(&whole.range()) {
                continue;
            }
            spans.claim(whole.range());
            push_unique(&mut out.values, format!("{} 20{}", rule.value, yy.as_str()));
            out.confidence = out.confidence.or(Confidence::new(rule.confidence));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(text: &str) -> Extraction<String> {
        extract(text, &mut Spans::default(), &InterpreterConfig::default())
    }

    #[test]
    fn season_alone() {
        let t = terms("math courses in the fall");
        assert_eq!(t.values, vec!["Fall"]);
        assert_eq!(t.confidence.value(), 0.9);
    }

    #[test]
    fn season_and_year_combine() {
        assert_eq!(terms("spring 2026 options").values, vec!["Spring 2026"]);
    }

    #[test]
    fn relative_terms_follow_config() {
        assert_eq!(terms("next semester").values, vec!["Spring"]);
        let config = InterpreterConfig {
            current_season: "Spring".into(),
            next_season: "Fall".into(),
            ..Default::default()
        };
        let t = extract("this semester", &mut Spans::default(), &config);
        assert_eq!(t.values, vec!["Spring"]);
    }

    #[test]
    fn shorthand() {
        let t = terms("was it offered f23 or s24");
        assert_eq!(t.values, vec!["Fall 2023", "Spring 2024"]);
        assert_eq!(t.confidence.value(), 0.85);
    }

    #[test]
    fn year_only_is_low_confidence() {
        let t = terms("anything in 2025");
        assert_eq!(t.values, vec!["2025"]);
        assert_eq!(t.confidence.value(), 0.6);
    }

    #[test]
    fn nothing() {
        assert!(terms("intro cs").is_empty());
    }
}
