use syllabus_core::{Bucket, Confidence, Course, Penalty};

use super::{BucketHit, IRetrievalStrategy, StrategyContext, StrategyOutput};

/// Direct lookups for every named or referenced course code.
///
/// Each missing code lowers confidence (explicit ×0.9, referenced ×0.8)
/// instead of failing.
#[derive(Debug, Default)]
pub struct ExplicitStrategy;

impl IRetrievalStrategy for ExplicitStrategy {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput {
        let intent = ctx.intent;
        if intent.course_codes.is_empty() && intent.referenced_codes.is_empty() {
            return StrategyOutput::skipped("explicit: no course codes in the query");
        }

        let mut found: Vec<Course> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();
        let mut confidence = Confidence::FULL;

        let requested = intent
            .course_codes
            .iter()
            .map(|c| (c, Penalty::MissingExplicitCode))
            .chain(
                intent
                    .referenced_codes
                    .iter()
                    .filter(|c| !intent.course_codes.contains(*c))
                    .map(|c| (c, Penalty::MissingReferencedCode)),
            );

        for (code, penalty) in requested {
            match ctx.index.by_code(code) {
                Some(course) => {
                    if !found.iter().any(|f| f.course_id == course.course_id) {
                        found.push(course.clone());
                    }
                }
                None => {
                    missing.push(code);
                    confidence = confidence.penalize(penalty);
                }
            }
        }

        let mut explanation = vec![format!(
            "explicit: found {} of {} requested course(s)",
            found.len(),
            found.len() + missing.len()
        )];
        if !missing.is_empty() {
            explanation.push(format!("explicit: not in the catalog: {}", missing.join(", ")));
        }

        StrategyOutput {
            hits: vec![BucketHit::new(Bucket::Explicit, found, confidence)],
            explanation,
        }
    }
}
