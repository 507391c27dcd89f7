//! Department keywords and their canonical codes.

use std::sync::LazyLock;

use syllabus_core::{Confidence, Penalty};

use super::{Extraction, Spans};
use crate::rules::{compile, Rule};

/// `(pattern, code, confidence)`. Longer phrases come first so that
/// "applied math" claims its span before "math" can.
pub const DEPARTMENT_TABLE: &[(&str, &str, f64)] = &[
    (r"\bapplied math(ematics)?\b", "APMTH", 0.9),
    (r"\bcomputer science\b", "COMPSCI", 0.9),
    (r"\bart history\b", "HAA", 0.85),
    (r"\bearth sciences?\b", "EPS", 0.85),
    (r"\bmath(ematics)?\b", "MATH", 0.9),
    (r"\b(compsci|cs)\b", "COMPSCI", 0.9),
    (r"\b(econ|economics)\b", "ECON", 0.9),
    (r"\b(gov|government)\b", "GOV", 0.9),
    (r"\bphysics\b", "PHYSICS", 0.9),
    (r"\b(chem|chemistry)\b", "CHEM", 0.9),
    (r"\b(hist|history)\b", "HIST", 0.9),
    (r"\b(eng|english)\b", "ENG", 0.85),
    (r"\b(phil|philosophy)\b", "PHIL", 0.9),
    (r"\b(stat|stats|statistics)\b", "STAT", 0.9),
    (r"\b(bio|biology)\b", "BIO", 0.9),
    (r"\b(psych|psy|psychology)\b", "PSY", 0.9),
    (r"\b(soc|sociol|sociology)\b", "SOC", 0.9),
    (r"\b(anthro|anthropology)\b", "ANTHRO", 0.9),
    (r"\b(astro|astronomy)\b", "ASTRON", 0.9),
    (r"\bapmth\b", "APMTH", 0.9),
    (r"\bmusic\b", "MUSIC", 0.9),
    (r"\b(theater|theatre)\b", "TDM", 0.8),
    (r"\bfrench\b", "FRENCH", 0.9),
    (r"\bspanish\b", "SPANISH", 0.9),
    (r"\bgerman\b", "GERMAN", 0.9),
    (r"\bchinese\b", "CHINESE", 0.9),
    (r"\bjapanese\b", "JAPANESE", 0.9),
    (r"\bclassics\b", "CLASSIC", 0.9),
    (r"\b(neuro|neuroscience)\b", "NEURO", 0.9),
    (r"\beducation\b", "EDU", 0.85),
];

static DEPARTMENT_RULES: LazyLock<Vec<Rule<&'static str>>> =
    LazyLock::new(|| compile(DEPARTMENT_TABLE));

/// Canonical code for a single department token (`"cs"` → `COMPSCI`),
/// or the token itself when it already is a known code.
pub fn canonical_department(token: &str) -> Option<&'static str> {
    let lower = token.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    DEPARTMENT_RULES
        .iter()
        .find(|rule| {
            rule.value.eq_ignore_ascii_case(&lower)
                || rule
                    .regex
                    .find(&lower)
                    .is_some_and(|m| m.start() == 0 && m.end() == lower.len())
        })
        .map(|rule| rule.value)
}

/// Departments named in `lower`, in first-match order.
pub fn extract(lower: &str, spans: &mut Spans) -> Extraction<String> {
    let mut out = Extraction::empty();
    for rule in DEPARTMENT_RULES.iter() {
        for m in rule.regex.find_iter(lower) {
            if spans.overlaps(&m.range()) {
                continue;
            }
            spans.claim(m.range());
            if !out.values.iter().any(|v| v == rule.value) {
                out.values.push(rule.value.to_string());
            }
            out.confidence = out.confidence.or(Confidence::new(rule.confidence));
        }
    }
    if out.values.len() > 1 {
        out.confidence = out.confidence.penalize(Penalty::MultipleValues);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cs_maps_to_compsci() {
        let d = extract("a good intro cs course", &mut Spans::default());
        assert_eq!(d.values, vec!["COMPSCI"]);
        assert_eq!(d.confidence.value(), 0.9);
    }

    #[test]
    fn applied_math_does_not_also_yield_math() {
        let d = extract("applied math electives", &mut Spans::default());
        assert_eq!(d.values, vec!["APMTH"]);
    }

    #[test]
    fn multiple_departments_are_demoted() {
        let d = extract("math or economics", &mut Spans::default());
        assert_eq!(d.values, vec!["MATH", "ECON"]);
        assert!(d.confidence.value() < 0.9);
    }

    #[test]
    fn canonical_lookup() {
        assert_eq!(canonical_department("cs"), Some("COMPSCI"));
        assert_eq!(canonical_department("MATH"), Some("MATH"));
        assert_eq!(canonical_department("Compsci"), Some("COMPSCI"));
        assert_eq!(canonical_department("under"), None);
    }
}
