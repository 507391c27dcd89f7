//! Preference tags (`easy`, `practical`, ...) and `interest:<subject>` tags.

use std::sync::LazyLock;

use regex::Regex;
use syllabus_core::constants::{INTEREST_PREFIX, PREF_EASY, PREF_HARD};
use syllabus_core::Confidence;

use super::Extraction;
use crate::rules::{best_per_value, compile, compile_patterns, Rule};

/// Negated phrases ("not too hard") are matched against the raw text; every
/// other rule sees the text with those phrases blanked out, so "not too hard"
/// never also reads as "hard".
const NEGATED_TABLE: &[(&str, &str, f64)] = &[
    (r"\bnot too (hard|difficult|challenging|demanding|heavy)\b", PREF_EASY, 0.75),
    (r"\bnot too (easy|simple|basic)\b", PREF_HARD, 0.75),
    (r"\bnot (boring|dull|dry)\b", "interesting", 0.75),
    (r"\bnot (theoretical|abstract)\b", "practical", 0.75),
    (r"\bnot (practical|applied)\b", "theoretical", 0.75),
    (r"\bnot (harsh|strict|arbitrary) grading\b", "fair_grading", 0.75),
];

const PREFERENCE_TABLE: &[(&str, &str, f64)] = &[
    (r"\b(easy|easiest|easier|simple|straightforward)\b", PREF_EASY, 0.9),
    (r"\b(light|lighter|manageable|reasonable|chill|chillest)\b", PREF_EASY, 0.85),
    (r"\b(gentle|introductory|intro|beginner|basic)\b", PREF_EASY, 0.8),
    (r"\blow (workload|time commitment|effort)\b", PREF_EASY, 0.8),
    (r"\b(hard|hardest|harder|difficult|challenging)\b", PREF_HARD, 0.9),
    (r"\b(rigorous|demanding|advanced|tough|intense)\b", PREF_HARD, 0.85),
    (r"\b(comprehensive|thorough|deep|complex)\b", PREF_HARD, 0.8),
    (r"\bhigh (difficulty|challenge)\b", PREF_HARD, 0.8),
    (r"\b(interesting|engaging|fun|enjoyable|exciting)\b", "interesting", 0.85),
    (r"\b(fascinating|captivating|inspiring|stimulating)\b", "interesting", 0.8),
    (r"\b(practical|applied|useful|real-world|hands-on)\b", "practical", 0.85),
    (r"\b(applicable|relevant|industry|career|skills?)\b", "practical", 0.8),
    (r"\b(theoretical|theory|conceptual|abstract|fundamental)\b", "theoretical", 0.85),
    (r"\b(philosophical|foundational|academic|intellectual)\b", "theoretical", 0.8),
    (r"\b(lecture|lectures|traditional)\b", "lecture", 0.85),
    (r"\bprofessor (talks|teaching|explaining)\b", "lecture", 0.75),
    (r"\b(discussion|seminar|interactive|participation)\b", "discussion", 0.85),
    (r"\b(debate|conversation|dialogue)\b", "discussion", 0.75),
    (r"\b(project|projects|hands-on|lab|labs)\b", "project", 0.85),
    (r"\b(building|creating|making|coding|programming)\b", "project", 0.8),
    (r"\b(fair|consistent|transparent) (grading|assessment)\b", "fair_grading", 0.85),
    (r"\bclear expectations\b", "fair_grading", 0.8),
    (r"\b(easy|generous|lenient) (grading|assessment)\b", "easy_grading", 0.85),
    (r"\bgrade inflation\b", "easy_grading", 0.8),
    (r"\beasy (a|b)\b", "easy_grading", 0.85),
];

/// Interest subjects end at a clause boundary.
const INTEREST_TABLE: &[(&str, (), f64)] = &[
    (
        r"\bpassion for ([a-z][a-z\- ]*?)(?:\s+(?:and|but|or|so|that|which|with|courses?|classes?|next|this)\b|[,.;?!]|$)",
        (),
        0.85,
    ),
    (
        r"\binterested in ([a-z][a-z\- ]*?)(?:\s+(?:and|but|or|so|that|which|with|courses?|classes?|next|this)\b|[,.;?!]|$)",
        (),
        0.8,
    ),
    (
        r"\bcurious about ([a-z][a-z\- ]*?)(?:\s+(?:and|but|or|so|that|which|with|courses?|classes?|next|this)\b|[,.;?!]|$)",
        (),
        0.75,
    ),
    (
        r"\bi (?:really )?enjoy ([a-z][a-z\- ]*?)(?:\s+(?:and|but|or|so|that|which|with|courses?|classes?|next|this)\b|[,.;?!]|$)",
        (),
        0.75,
    ),
    (
        r"\bi (?:really )?like ([a-z][a-z\- ]*?)(?:\s+(?:and|but|or|so|that|which|with|courses?|classes?|next|this)\b|[,.;?!]|$)",
        (),
        0.7,
    ),
];

/// Interests longer than this many words are dropped.
const MAX_INTEREST_WORDS: usize = 3;

static NEGATED_RULES: LazyLock<Vec<Rule<&'static str>>> = LazyLock::new(|| compile(NEGATED_TABLE));
static PREFERENCE_RULES: LazyLock<Vec<Rule<&'static str>>> =
    LazyLock::new(|| compile(PREFERENCE_TABLE));
static INTEREST_RULES: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| compile(INTEREST_TABLE));
static NEGATION: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"\bnot( too)? [a-z]+( grading)?\b"])
});

fn blank_negations(lower: &str) -> String {
    NEGATION
        .iter()
        .fold(lower.to_string(), |text, re| re.replace_all(&text, " ").into_owned())
}

pub fn extract(lower: &str) -> Extraction<String> {
    let mut out = Extraction::empty();
    let masked = blank_negations(lower);

    let hits = best_per_value(&NEGATED_RULES, lower)
        .into_iter()
        .chain(best_per_value(&PREFERENCE_RULES, &masked));
    for (tag, confidence) in hits {
        if !out.values.iter().any(|v| v == tag) {
            out.values.push(tag.to_string());
        }
        out.confidence = out.confidence.or(Confidence::new(confidence));
    }

    for rule in INTEREST_RULES.iter() {
        for caps in rule.regex.captures_iter(lower) {
            let Some(subject) = caps.get(1) else { continue };
            let subject = subject.as_str().trim();
            let words = subject.split_whitespace().count();
            if words == 0 || words > MAX_INTEREST_WORDS {
                continue;
            }
            let tag = format!("{INTEREST_PREFIX}{subject}");
            if !out.values.contains(&tag) {
                out.values.push(tag);
            }
            out.confidence = out.confidence.or(Confidence::new(rule.confidence));
        }
    }

    out
}
