//! Fallback options for the top picks, from the similar-courses capability.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use syllabus_core::errors::BackendError;
use syllabus_core::models::Alternative;
use syllabus_core::traits::ISimilarCourses;
use syllabus_core::Course;
use syllabus_retrieval::backend::{call_bounded, or_empty};

use crate::reasons::{reasons_for, ReasonContext};

/// Rating and workload of `alt` relative to `base`, e.g.
/// `"Similar to MATH 131: rated 0.2 higher, 1.0 fewer hours/week"`.
pub fn delta_description(alt: &Course, base: &Course) -> String {
    let rating = match (alt.overall_rating, base.overall_rating) {
        (Some(a), Some(b)) if a - b > 0.05 => format!("rated {:.1} higher", a - b),
        (Some(a), Some(b)) if b - a > 0.05 => format!("rated {:.1} lower", b - a),
        (Some(_), Some(_)) => "similarly rated".to_string(),
        _ => "rating not comparable".to_string(),
    };
    let workload = match (alt.mean_weekly_hours, base.mean_weekly_hours) {
        (Some(a), Some(b)) if b - a > 0.5 => format!("{:.1} fewer hours/week", b - a),
        (Some(a), Some(b)) if a - b > 0.5 => format!("{:.1} more hours/week", a - b),
        (Some(_), Some(_)) => "similar workload".to_string(),
        _ => "workload not comparable".to_string(),
    };
    format!("Similar to {}: {rating}, {workload}", base.code)
}

/// Up to `per_course` alternatives for each of `bases`. Alternatives never
/// repeat a course in `recommended`, a taken course, or each other.
///
/// `bases` is usually a prefix of `recommended`; the whole recommended list is
/// excluded, not just the bases.
pub fn find(
    similar: &Arc<dyn ISimilarCourses>,
    bases: &[Course],
    recommended: &[Course],
    per_course: usize,
    timeout: Duration,
    ctx: &ReasonContext<'_>,
) -> Vec<Alternative> {
    let recommended: BTreeSet<&str> = recommended
        .iter()
        .chain(bases)
        .map(|c| c.code.as_str())
        .collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut alternatives = Vec::new();

    for base in bases {
        let result = if similar.is_available() {
            let provider = Arc::clone(similar);
            let code = base.code.clone();
            // Ask for extra so filtering still leaves enough.
            let want = per_course + recommended.len() + ctx.taken.len();
            call_bounded(similar.name(), timeout, move || provider.similar_to(&code, want))
        } else {
            Err(BackendError::Unavailable {
                backend: similar.name().to_string(),
            })
        };
        let (courses, _) = or_empty(result);

        let picked = courses
            .into_iter()
            .filter(|c| c.code != base.code)
            .filter(|c| !recommended.contains(c.code.as_str()))
            .filter(|c| !ctx.taken.contains(&c.code))
            .filter(|c| used.insert(c.code.clone()))
            .take(per_course);
        for course in picked {
            alternatives.push(Alternative {
                reason: delta_description(&course, base),
                detail_reasons: reasons_for(&course, ctx),
                replaces_code: base.code.clone(),
                course,
            });
        }
    }
    alternatives
}
