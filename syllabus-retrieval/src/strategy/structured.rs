use syllabus_core::{Bucket, Confidence, Course, IntentField, Penalty, QueryIntent};

use super::{owned_unique, BucketHit, IRetrievalStrategy, StrategyContext, StrategyOutput};

/// Department × level-range lookups.
///
/// Emits two buckets: `Level` with the raw range matches and `Structured`
/// with the matches that also pass the term and constraint filters. With a
/// level range but no department, the student's concentration stands in.
#[derive(Debug, Default)]
pub struct StructuredStrategy;

/// Courses missing workload or rating data are never filtered out for it.
pub fn passes_filters(course: &Course, intent: &QueryIntent) -> bool {
    let term_ok = intent.terms.is_empty() || intent.terms.iter().any(|t| course.matches_term(t));
    let hours_ok = match (intent.constraints.max_hours, course.mean_weekly_hours) {
        (Some(max), Some(h)) => h <= max,
        _ => true,
    };
    let score_ok = match (intent.constraints.min_score, course.overall_rating) {
        (Some(min), Some(r)) => r >= min,
        _ => true,
    };
    term_ok && hours_ok && score_ok
}

impl IRetrievalStrategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput {
        let intent = ctx.intent;
        let levels = &intent.level_ranges;
        let mut explanation = Vec::new();

        let mut departments: Vec<String> = intent.departments.iter().cloned().collect();
        let mut substituted = false;
        if departments.is_empty() && !levels.is_empty() {
            if let Some(concentration) = ctx.profile.concentration.as_deref() {
                departments = ctx.index.by_department_alias(concentration).into_iter().collect();
                if !departments.is_empty() {
                    substituted = true;
                    explanation.push(format!(
                        "structured: no department given, using {} from concentration {concentration}",
                        departments.join(", ")
                    ));
                }
            }
        }
        if departments.is_empty() {
            return StrategyOutput::skipped("structured: no department to filter on");
        }

        let department_confidence = intent.confidence_of(IntentField::Departments);
        let level_confidence = intent.confidence_of(IntentField::LevelRanges);
        let confidence: Confidence = if levels.is_empty() {
            department_confidence
        } else if substituted {
            level_confidence.penalize(Penalty::ConcentrationSubstitute)
        } else {
            department_confidence.and(level_confidence)
        };

        let matched: Vec<&Course> = if levels.is_empty() {
            departments
                .iter()
                .flat_map(|d| ctx.index.by_department(d))
                .collect()
        } else {
            departments
                .iter()
                .flat_map(|d| {
                    levels
                        .iter()
                        .flat_map(move |r| ctx.index.by_level_range(d, r.low, r.high))
                })
                .collect()
        };
        let level_matches = owned_unique(matched);
        let filtered: Vec<Course> = level_matches
            .iter()
            .filter(|c| passes_filters(c, intent))
            .cloned()
            .collect();

        let scope = if levels.is_empty() {
            "all levels".to_string()
        } else {
            levels.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
        };
        explanation.push(format!(
            "structured: {} of {} course(s) in {} ({scope}) pass the term and constraint filters",
            filtered.len(),
            level_matches.len(),
            departments.join(", ")
        ));

        let mut hits = Vec::with_capacity(2);
        hits.push(BucketHit::new(Bucket::Structured, filtered, confidence));
        if !levels.is_empty() {
            hits.push(BucketHit::new(Bucket::Level, level_matches, confidence));
        }
        StrategyOutput { hits, explanation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(hours: Option<f64>, rating: Option<f64>, term: &str) -> Course {
        Course {
            course_id: 1,
            code: "MATH 131".into(),
            department: "Mathematics".into(),
            title: "Topology".into(),
            term: term.into(),
            instructors: Vec::new(),
            description: String::new(),
            requirements_text: String::new(),
            mean_weekly_hours: hours,
            overall_rating: rating,
            student_comments: Vec::new(),
        }
    }

    #[test]
    fn missing_data_is_not_excluded() {
        let mut intent = QueryIntent::new("x");
        intent.constraints.max_hours = Some(8.0);
        intent.constraints.min_score = Some(4.0);
        assert!(passes_filters(&course(None, None, "Fall 2025"), &intent));
        assert!(!passes_filters(&course(Some(12.0), None, "Fall 2025"), &intent));
        assert!(!passes_filters(&course(None, Some(3.5), "Fall 2025"), &intent));
    }

    #[test]
    fn term_filter_uses_tokens() {
        let mut intent = QueryIntent::new("x");
        intent.terms.insert("Fall".into());
        assert!(passes_filters(&course(None, None, "2025 Fall"), &intent));
        assert!(!passes_filters(&course(None, None, "Spring 2026"), &intent));
    }
}
