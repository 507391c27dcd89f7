//! Query text for the lexical and semantic backends.
//!
//! Preference tags are expanded into natural language before semantic
//! search: "easy" → "easy manageable workload".

use syllabus_core::constants::INTEREST_PREFIX;
use syllabus_core::models::{Difficulty, Format, Relevance};
use syllabus_core::QueryIntent;

/// Preference tag → phrase appended to the semantic query.
const PREFERENCE_PHRASES: &[(&str, &str)] = &[
    ("easy", "easy manageable workload"),
    ("hard", "challenging rigorous advanced"),
    ("interesting", "interesting engaging"),
    ("practical", "practical applied real-world"),
    ("theoretical", "theoretical conceptual foundations"),
    ("lecture", "lecture based"),
    ("discussion", "discussion seminar"),
    ("project", "project based hands-on"),
    ("fair_grading", "fair grading clear expectations"),
    ("easy_grading", "generous grading"),
];

fn push_unique(parts: &mut Vec<String>, phrase: &str) {
    if !phrase.is_empty() && !parts.iter().any(|p| p == phrase) {
        parts.push(phrase.to_string());
    }
}

/// Raw text plus expanded preferences, interests and aspects.
pub fn semantic_query(intent: &QueryIntent) -> String {
    let mut parts: Vec<String> = vec![intent.raw_text.trim().to_string()];

    for pref in &intent.preferences {
        if let Some(subject) = pref.strip_prefix(INTEREST_PREFIX) {
            push_unique(&mut parts, subject);
        } else if let Some((_, phrase)) = PREFERENCE_PHRASES.iter().find(|(tag, _)| *tag == pref.as_str()) {
            push_unique(&mut parts, phrase);
        }
    }

    let aspects = &intent.aspects;
    if let Some(d) = aspects.difficulty {
        push_unique(
            &mut parts,
            match d {
                Difficulty::Easy => "light workload",
                Difficulty::Moderate => "balanced workload",
                Difficulty::Hard => "demanding coursework",
            },
        );
    }
    if let Some(f) = aspects.format {
        push_unique(
            &mut parts,
            match f {
                Format::Lecture => "lectures",
                Format::Seminar => "seminar discussion",
                Format::Project => "projects labs",
            },
        );
    }
    if let Some(r) = aspects.relevance {
        push_unique(
            &mut parts,
            match r {
                Relevance::Career => "career industry skills",
                Relevance::Personal => "personal interest",
                Relevance::Degree => "concentration requirement",
            },
        );
    }

    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

/// Departments, codes and levels followed by the raw text.
pub fn lexical_query(intent: &QueryIntent) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.extend(intent.departments.iter().cloned());
    parts.extend(intent.course_codes.iter().cloned());
    parts.extend(intent.referenced_codes.iter().cloned());
    parts.extend(intent.level_ranges.iter().map(|l| l.to_string()));
    parts.push(intent.raw_text.trim().to_string());
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_expands() {
        let mut intent = QueryIntent::new("a math class");
        intent.preferences.insert("easy".into());
        intent.preferences.insert("interest:topology".into());
        let q = semantic_query(&intent);
        assert_eq!(q, "a math class easy manageable workload topology");
    }

    #[test]
    fn lexical_query_leads_with_structure() {
        let mut intent = QueryIntent::new("something in the 130s");
        intent.departments.insert("MATH".into());
        intent.level_ranges.push(syllabus_core::LevelRange::new(130, 139));
        assert_eq!(lexical_query(&intent), "MATH 130-139 something in the 130s");
    }
}
