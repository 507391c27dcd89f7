//! Short, ordered justifications for each recommended course.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use syllabus_core::{Course, StudentProfile};
use syllabus_index::parse_code;

const MAX_QUOTE_CHARS: usize = 100;

static POSITIVE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(great|excellent|amazing|awesome|loved?|fun|interesting|helpful|engaging|clear|best|fantastic|enjoy(ed|able)?|recommend(ed)?)\b",
    )
    .ok()
});

static NEGATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(not|never|no|isn't|wasn't|don't|didn't)\b").ok());

/// Inputs shared by every course's reasons in one pass.
pub struct ReasonContext<'a> {
    pub profile: &'a StudentProfile,
    pub taken: &'a BTreeSet<String>,
    pub concentration: &'a BTreeSet<String>,
    pub terms: &'a BTreeSet<String>,
}

pub fn rating_band(rating: f64) -> String {
    if rating >= 4.5 {
        format!("Highly rated ({rating:.2}/5)")
    } else if rating >= 4.0 {
        format!("Well-rated ({rating:.2}/5)")
    } else {
        format!("Rated {rating:.2}/5")
    }
}

pub fn workload_band(hours: f64) -> String {
    if hours < 8.0 {
        format!("Light workload ({hours:.1} hours/week)")
    } else if hours < 12.0 {
        format!("Moderate workload ({hours:.1} hours/week)")
    } else {
        format!("Heavy workload ({hours:.1} hours/week)")
    }
}

pub fn level_band(number: u32) -> &'static str {
    match number {
        0..=99 => "Introductory level course",
        100..=199 => "Intermediate undergraduate course",
        _ => "Advanced course",
    }
}

/// Whether any taken course shares the department at a lower number.
pub fn builds_on_taken(course: &Course, taken: &BTreeSet<String>) -> bool {
    let (Some(number), dept) = (course.number(), course.code_department()) else {
        return false;
    };
    taken
        .iter()
        .filter_map(|c| parse_code(c))
        .any(|p| p.department == dept && p.number < number)
}

/// Upper-level course with no coursework in its department on record.
pub fn prerequisite_risk(course: &Course, taken: &BTreeSet<String>) -> bool {
    let dept = course.code_department();
    course.number().is_some_and(|n| n >= 100)
        && !taken
            .iter()
            .filter_map(|c| parse_code(c))
            .any(|p| p.department == dept)
}

/// First positive, un-negated sentence from the student comments.
pub fn positive_quote(comments: &[String]) -> Option<String> {
    let positive = POSITIVE.as_ref()?;
    let negation = NEGATION.as_ref()?;
    comments
        .iter()
        .flat_map(|c| c.split(['.', '!', '?', '\n']))
        .map(str::trim)
        .find(|s| !s.is_empty() && positive.is_match(s) && !negation.is_match(s))
        .map(|s| {
            if s.chars().count() > MAX_QUOTE_CHARS {
                let cut: String = s.chars().take(MAX_QUOTE_CHARS - 3).collect();
                format!("{cut}...")
            } else {
                s.to_string()
            }
        })
}

pub fn reasons_for(course: &Course, ctx: &ReasonContext<'_>) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(rating) = course.overall_rating {
        reasons.push(rating_band(rating));
    }
    if let Some(hours) = course.mean_weekly_hours {
        reasons.push(workload_band(hours));
    }
    if !course.term.is_empty() {
        if ctx.terms.iter().any(|t| course.matches_term(t)) {
            reasons.push(format!("Offered in {}, as requested", course.term));
        } else {
            reasons.push(format!("Offered in {}", course.term));
        }
    }
    if let Some(number) = course.number() {
        reasons.push(level_band(number).to_string());
    }
    if ctx.concentration.contains(course.code_department()) {
        if let Some(name) = ctx.profile.concentration.as_deref() {
            reasons.push(format!("In your concentration ({name})"));
        }
    }
    if builds_on_taken(course, ctx.taken) {
        reasons.push("Builds on your previous coursework".to_string());
    }
    if let Some(quote) = positive_quote(&course.student_comments) {
        reasons.push(format!("Students say: \"{quote}\""));
    }
    reasons
}
