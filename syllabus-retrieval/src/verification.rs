//! Post-ranking checks. Every finding is a warning string, never an error.

use std::collections::BTreeSet;

use syllabus_core::{Course, LevelRange, QueryIntent, StudentProfile};
use syllabus_index::normalize_code;

/// How many leading results the term and level checks look at.
pub const TOP_CHECKED: usize = 3;

pub fn verify(ranking: &[Course], intent: &QueryIntent, profile: &StudentProfile) -> Vec<String> {
    if ranking.is_empty() {
        return vec!["No courses matched the request".to_string()];
    }
    let top = &ranking[..ranking.len().min(TOP_CHECKED)];
    let mut warnings = Vec::new();

    if !intent.terms.is_empty()
        && !top
            .iter()
            .any(|c| intent.terms.iter().any(|t| c.matches_term(t)))
    {
        warnings.push(format!(
            "None of the top results are offered in {}",
            join(intent.terms.iter().map(String::as_str))
        ));
    }

    if !intent.level_ranges.is_empty() && !top.iter().any(|c| c.in_any_range(&intent.level_ranges)) {
        warnings.push(format!(
            "None of the top results are in the requested levels ({})",
            levels(&intent.level_ranges)
        ));
    }

    let taken: BTreeSet<String> = profile
        .courses_taken
        .iter()
        .filter_map(|c| normalize_code(c))
        .collect();
    for course in top.iter().filter(|c| taken.contains(&c.code)) {
        warnings.push(format!("{} is already in your taken courses", course.code));
    }
    warnings
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn levels(ranges: &[LevelRange]) -> String {
    ranges.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", ")
}
