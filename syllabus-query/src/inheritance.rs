//! Carrying fields forward from the previous turn's intent.

use syllabus_core::{IntentField, Penalty, QueryIntent};
use tracing::debug;

/// Copy empty slots of `intent` from `previous`, each at the previous
/// confidence times `penalty`. Returns the fields that were copied.
///
/// The caller decides whether inheritance applies at all; this only fills
/// what is missing.
pub fn inherit(intent: &mut QueryIntent, previous: &QueryIntent, penalty: f64) -> Vec<IntentField> {
    let mut copied = Vec::new();
    let factor = Penalty::Inherited(penalty);

    if intent.departments.is_empty() && !previous.departments.is_empty() {
        intent.departments = previous.departments.clone();
        copied.push(IntentField::Departments);
    }
    if intent.level_ranges.is_empty() && !previous.level_ranges.is_empty() {
        intent.level_ranges = previous.level_ranges.clone();
        copied.push(IntentField::LevelRanges);
    }
    if intent.course_codes.is_empty() && !previous.course_codes.is_empty() {
        intent.course_codes = previous.course_codes.clone();
        copied.push(IntentField::CourseCodes);
    }
    if intent.terms.is_empty() && !previous.terms.is_empty() {
        intent.terms = previous.terms.clone();
        copied.push(IntentField::Terms);
    }

    let mut constraints_copied = false;
    if intent.constraints.max_hours.is_none() && previous.constraints.max_hours.is_some() {
        intent.constraints.max_hours = previous.constraints.max_hours;
        constraints_copied = true;
    }
    if intent.constraints.min_score.is_none() && previous.constraints.min_score.is_some() {
        intent.constraints.min_score = previous.constraints.min_score;
        constraints_copied = true;
    }
    if constraints_copied {
        copied.push(IntentField::Constraints);
    }

    for field in &copied {
        let inherited = previous.confidence_of(*field).penalize(factor);
        // A field partly set by this turn keeps the stronger of the two.
        let current = intent.confidence_of(*field);
        intent.set_confidence(*field, current.or(inherited));
    }

    if !copied.is_empty() {
        debug!(fields = ?copied, penalty, "fields inherited from previous turn");
    }
    copied
}
