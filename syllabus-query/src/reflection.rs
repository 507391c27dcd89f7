//! Caveats an interpretation attaches to itself.

use syllabus_core::config::InterpreterConfig;
use syllabus_core::constants::{PREF_EASY, PREF_HARD};
use syllabus_core::models::Reflection;
use syllabus_core::{IntentField, QueryIntent};

/// Follow-ups below this confidence with nothing referenced are flagged.
const CLEAR_FOLLOWUP: f64 = 0.8;

fn join<I: IntoIterator<Item = String>>(items: I) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

/// Build the reflection for a finished intent. `notes` are extractor caveats
/// (ambiguous bare numbers and the like) surfaced as needing verification.
pub fn reflect(intent: &QueryIntent, notes: &[String], config: &InterpreterConfig) -> Reflection {
    let mut r = Reflection::default();

    if intent.departments.is_empty() && intent.course_codes.is_empty() {
        r.missing.push("No department or course specified".to_string());
    }
    if intent.level_ranges.is_empty() && intent.course_codes.is_empty() {
        r.missing.push("No course level specified".to_string());
    }
    if intent.terms.is_empty() {
        r.missing.push("No term/semester specified".to_string());
    }

    if intent.departments.len() > 1 {
        r.ambiguous.push(format!(
            "Multiple departments specified: {}",
            join(intent.departments.iter().cloned())
        ));
    }
    if intent.level_ranges.len() > 1 {
        r.ambiguous.push(format!(
            "Multiple course levels specified: {}",
            join(intent.level_ranges.iter().map(|l| l.to_string()))
        ));
    }
    if intent.preferences.contains(PREF_EASY) && intent.preferences.contains(PREF_HARD) {
        r.ambiguous.push("Conflicting difficulty preferences".to_string());
    }
    if intent.preferences.contains("practical") && intent.preferences.contains("theoretical") {
        r.ambiguous.push("Conflicting style preferences".to_string());
    }

    if intent.confidence_of(IntentField::Intent).value() < config.low_intent_confidence {
        r.needs_verification.push("Intent is unclear".to_string());
    }
    if intent.is_followup
        && intent.referenced_codes.is_empty()
        && intent.confidence_of(IntentField::IsFollowup).value() < CLEAR_FOLLOWUP
    {
        r.needs_verification.push("Follow-up reference is unclear".to_string());
    }
    if let Some(h) = intent.constraints.max_hours {
        if h < config.extreme_max_hours {
            r.needs_verification.push(format!("Very low max hours constraint: {h}"));
        }
    }
    if let Some(s) = intent.constraints.min_score {
        if s > config.extreme_min_score {
            r.needs_verification.push(format!("Very high min score constraint: {s}"));
        }
    }
    r.needs_verification.extend(notes.iter().cloned());

    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{Confidence, LevelRange};

    fn config() -> InterpreterConfig {
        InterpreterConfig::default()
    }

    #[test]
    fn empty_intent_reports_everything_missing() {
        let intent = QueryIntent::new("hi");
        let r = reflect(&intent, &[], &config());
        assert_eq!(r.missing.len(), 3);
        assert_eq!(r.needs_verification, vec!["Intent is unclear"]);
    }

    #[test]
    fn conflicts_and_multiples() {
        let mut intent = QueryIntent::new("x");
        intent.set_confidence(IntentField::Intent, Confidence::new(0.9));
        intent.departments.extend(["ECON".to_string(), "MATH".to_string()]);
        intent.level_ranges.extend([LevelRange::new(100, 199), LevelRange::new(130, 139)]);
        intent.preferences.extend(["easy".to_string(), "hard".to_string()]);
        let r = reflect(&intent, &[], &config());
        assert_eq!(
            r.ambiguous,
            vec![
                "Multiple departments specified: ECON, MATH",
                "Multiple course levels specified: 100-199, 130-139",
                "Conflicting difficulty preferences",
            ]
        );
    }

    #[test]
    fn extreme_constraints_need_verification() {
        let mut intent = QueryIntent::new("x");
        intent.set_confidence(IntentField::Intent, Confidence::new(0.9));
        intent.constraints.max_hours = Some(3.0);
        intent.constraints.min_score = Some(4.8);
        let r = reflect(&intent, &["note".to_string()], &config());
        assert_eq!(
            r.needs_verification,
            vec![
                "Very low max hours constraint: 3",
                "Very high min score constraint: 4.8",
                "note"
            ]
        );
    }
}
