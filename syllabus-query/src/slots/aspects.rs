//! Semantic aspects and implicit preferences.
//!
//! Each aspect takes the first value (table order) whose rule fires.

use std::sync::LazyLock;

use syllabus_core::models::{Difficulty, Format, InterestLevel, Relevance, SemanticAspects};

use crate::rules::{compile, fired, Rule};

const DIFFICULTY_TABLE: &[(&str, Difficulty, f64)] = &[
    (r"\b(easy|easiest|easier|simple|straightforward|light|manageable|chill|chillest)\b", Difficulty::Easy, 1.0),
    (r"\bnot too (hard|difficult|challenging|demanding)\b", Difficulty::Easy, 1.0),
    (r"\blow (workload|time commitment|effort)\b", Difficulty::Easy, 1.0),
    (r"\b(moderate|balanced|medium|intermediate|reasonable)\b", Difficulty::Moderate, 1.0),
    (r"\bmiddle ground\b", Difficulty::Moderate, 1.0),
    (r"\b(hard|hardest|harder|difficult|challenging|rigorous|demanding|advanced|tough|intense)\b", Difficulty::Hard, 1.0),
    (r"\bhigh (difficulty|challenge|level)\b", Difficulty::Hard, 1.0),
];

const INTEREST_LEVEL_TABLE: &[(&str, InterestLevel, f64)] = &[
    (r"\b(interesting|fascinating|captivating|exciting|engaging|fun)\b", InterestLevel::High, 1.0),
    (r"\breally (like|enjoy|love)\b", InterestLevel::High, 1.0),
    (r"\b(passion for|favorite)\b", InterestLevel::High, 1.0),
    (r"\b(somewhat interesting|moderately engaging)\b", InterestLevel::Medium, 1.0),
    (r"\b(kind of|might) (like|enjoy)\b", InterestLevel::Medium, 1.0),
    (r"\bnot (boring|dull|dry)\b", InterestLevel::Low, 1.0),
    (r"\b(tolerable|get through)\b", InterestLevel::Low, 1.0),
];

const RELEVANCE_TABLE: &[(&str, Relevance, f64)] = &[
    (r"\b(career|job|profession|industry|employment|professional)\b", Relevance::Career, 1.0),
    (r"\bafter graduation\b", Relevance::Career, 1.0),
    (r"\bfuture (job|work|career)\b", Relevance::Career, 1.0),
    (r"\b(hobby|personal|personally|passion|curious)\b", Relevance::Personal, 1.0),
    (r"\bfor fun\b", Relevance::Personal, 1.0),
    (r"\b(requirements?|required|concentration|major|minor|degree|graduate|graduation)\b", Relevance::Degree, 1.0),
    (r"\b(have to take|fulfill)\b", Relevance::Degree, 1.0),
];

const FORMAT_TABLE: &[(&str, Format, f64)] = &[
    (r"\b(lecture|lectures|traditional|instructor-led)\b", Format::Lecture, 1.0),
    (r"\bprofessor (talks|teaching|explaining)\b", Format::Lecture, 1.0),
    (r"\b(discussion|seminar|interactive|participation|small class)\b", Format::Seminar, 1.0),
    (r"\b(debate|conversation|dialogue|discussing)\b", Format::Seminar, 1.0),
    (r"\b(project|projects|hands-on|practical|lab|labs|workshop)\b", Format::Project, 1.0),
    (r"\b(building|creating|making|coding|programming|implementing)\b", Format::Project, 1.0),
];

const IMPLICIT_TABLE: &[(&str, &str, f64)] = &[
    (r"\b(best|top|prestigious|renowned|famous|well-known|popular)\b", "high_prestige", 1.0),
    (r"\b(small|intimate|fewer students|individual attention)\b", "small_class", 1.0),
    (r"\bnot too big\b", "small_class", 1.0),
    (r"\b(good professor|great teacher|excellent instructor|engaging faculty|best taught)\b", "good_professor", 1.0),
    (r"\b(not much writing|minimal papers|few essays|no papers|not essay-based)\b", "minimal_writing", 1.0),
    (r"\b(not much reading|light reading|few readings|minimal reading|not reading-heavy)\b", "minimal_reading", 1.0),
    (r"\b(friends|social|collaborate|group work|meet people|team)\b", "social", 1.0),
];

static DIFFICULTY_RULES: LazyLock<Vec<Rule<Difficulty>>> = LazyLock::new(|| compile(DIFFICULTY_TABLE));
static INTEREST_LEVEL_RULES: LazyLock<Vec<Rule<InterestLevel>>> =
    LazyLock::new(|| compile(INTEREST_LEVEL_TABLE));
static RELEVANCE_RULES: LazyLock<Vec<Rule<Relevance>>> = LazyLock::new(|| compile(RELEVANCE_TABLE));
static FORMAT_RULES: LazyLock<Vec<Rule<Format>>> = LazyLock::new(|| compile(FORMAT_TABLE));
static IMPLICIT_RULES: LazyLock<Vec<Rule<&'static str>>> = LazyLock::new(|| compile(IMPLICIT_TABLE));

fn first<T: Copy>(rules: &[Rule<T>], lower: &str) -> Option<T> {
    fired(rules, lower).next().map(|r| r.value)
}

pub fn extract(lower: &str) -> SemanticAspects {
    SemanticAspects {
        difficulty: first(&DIFFICULTY_RULES, lower),
        interest_level: first(&INTEREST_LEVEL_RULES, lower),
        relevance: first(&RELEVANCE_RULES, lower),
        format: first(&FORMAT_RULES, lower),
    }
}

/// Implicit preference tags, in table order.
pub fn implicit(lower: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for rule in fired(&IMPLICIT_RULES, lower) {
        if !tags.iter().any(|t| t == rule.value) {
            tags.push(rule.value.to_string());
        }
    }
    tags
}
