//! Caveats the recommender attaches to its own output.

use std::collections::BTreeSet;

use syllabus_core::config::RecommendationConfig;
use syllabus_core::{Confidence, Course, QueryIntent, StudentProfile};

use crate::reasons::prerequisite_risk;

/// Hours above which a course contradicts an "easy" request.
const EASY_MISMATCH_HOURS: f64 = 12.0;
/// Hours below which a course contradicts a "hard" request.
const HARD_MISMATCH_HOURS: f64 = 8.0;

pub struct ReflectionInput<'a> {
    pub top: &'a [Course],
    pub intent: &'a QueryIntent,
    pub profile: &'a StudentProfile,
    pub taken: &'a BTreeSet<String>,
    pub concentration: &'a BTreeSet<String>,
    pub overall: Confidence,
    pub relaxations: &'a [String],
}

fn codes<'c>(courses: impl Iterator<Item = &'c Course>) -> String {
    courses.map(|c| c.code.as_str()).collect::<Vec<_>>().join(", ")
}

pub fn reflect(input: &ReflectionInput<'_>, config: &RecommendationConfig) -> Vec<String> {
    let mut notes = Vec::new();
    let top = input.top;

    if top.is_empty() {
        notes.push("No courses matched, even after relaxing every constraint".to_string());
        return notes;
    }
    if top.len() < config.min_results {
        notes.push(format!("Only {} recommendation(s) found", top.len()));
    }
    if !input.relaxations.is_empty() {
        notes.push(format!("To find candidates the search {}", input.relaxations.join(", then ")));
    }
    if input.overall.value() < config.low_confidence {
        notes.push(format!("Low confidence in these recommendations ({})", input.overall));
    }

    let risky: Vec<&Course> = top.iter().filter(|c| prerequisite_risk(c, input.taken)).collect();
    if !risky.is_empty() {
        notes.push(format!(
            "Check prerequisites for {}: no coursework in the department on record",
            codes(risky.into_iter())
        ));
    }

    let intent = input.intent;
    if intent.prefers_easy() && !intent.prefers_hard() {
        let heavy = top
            .iter()
            .filter(|c| c.mean_weekly_hours.is_some_and(|h| h > EASY_MISMATCH_HOURS));
        let heavy = codes(heavy);
        if !heavy.is_empty() {
            notes.push(format!("Heavier than requested: {heavy}"));
        }
    } else if intent.prefers_hard() && !intent.prefers_easy() {
        let light = top
            .iter()
            .filter(|c| c.mean_weekly_hours.is_some_and(|h| h < HARD_MISMATCH_HOURS));
        let light = codes(light);
        if !light.is_empty() {
            notes.push(format!("Lighter than requested: {light}"));
        }
    }

    if let Some(name) = input.profile.concentration.as_deref() {
        if !top
            .iter()
            .any(|c| input.concentration.contains(c.code_department()))
        {
            notes.push(format!("None of these are in your concentration ({name})"));
        }
    }

    if !intent.terms.is_empty() {
        let off_term = top
            .iter()
            .filter(|c| !intent.terms.iter().any(|t| c.matches_term(t)));
        let off_term = codes(off_term);
        if !off_term.is_empty() {
            let terms = intent.terms.iter().cloned().collect::<Vec<_>>().join(", ");
            notes.push(format!("Not offered in {terms}: {off_term}"));
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, term: &str, hours: f64) -> Course {
        Course {
            course_id: 1,
            code: code.into(),
            department: String::new(),
            title: String::new(),
            term: term.into(),
            instructors: Vec::new(),
            description: String::new(),
            requirements_text: String::new(),
            mean_weekly_hours: Some(hours),
            overall_rating: Some(4.0),
            student_comments: Vec::new(),
        }
    }

    #[test]
    fn flags_every_category() {
        let top = vec![course("MATH 131", "Fall 2025", 14.0)];
        let mut intent = QueryIntent::new("easy spring");
        intent.preferences.insert("easy".into());
        intent.terms.insert("Spring".into());
        let profile = StudentProfile::default().with_concentration("Economics");
        let conc: BTreeSet<String> = ["ECON".to_string()].into();
        let relaxations = vec!["loosened the workload limit".to_string()];
        let input = ReflectionInput {
            top: &top,
            intent: &intent,
            profile: &profile,
            taken: &BTreeSet::new(),
            concentration: &conc,
            overall: Confidence::new(0.3),
            relaxations: &relaxations,
        };
        assert_eq!(
            reflect(&input, &RecommendationConfig::default()),
            vec![
                "Only 1 recommendation(s) found",
                "To find candidates the search loosened the workload limit",
                "Low confidence in these recommendations (0.30)",
                "Check prerequisites for MATH 131: no coursework in the department on record",
                "Heavier than requested: MATH 131",
                "None of these are in your concentration (Economics)",
                "Not offered in Spring: MATH 131",
            ]
        );
    }

    #[test]
    fn empty_result_has_single_note() {
        let input = ReflectionInput {
            top: &[],
            intent: &QueryIntent::new("x"),
            profile: &StudentProfile::default(),
            taken: &BTreeSet::new(),
            concentration: &BTreeSet::new(),
            overall: Confidence::NONE,
            relaxations: &[],
        };
        assert_eq!(reflect(&input, &RecommendationConfig::default()).len(), 1);
    }
}
