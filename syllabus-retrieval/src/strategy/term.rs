use syllabus_core::{Bucket, IntentField};

use super::{owned_unique, BucketHit, IRetrievalStrategy, StrategyContext, StrategyOutput};

/// Every course offered in one of the requested terms.
#[derive(Debug, Default)]
pub struct TermStrategy;

impl IRetrievalStrategy for TermStrategy {
    fn name(&self) -> &'static str {
        "term"
    }

    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput {
        let terms = &ctx.intent.terms;
        if terms.is_empty() {
            return StrategyOutput::skipped("term: no term requested");
        }

        let courses = owned_unique(terms.iter().flat_map(|t| ctx.index.by_term(t)));
        let explanation = vec![format!(
            "term: {} course(s) offered in {}",
            courses.len(),
            terms.iter().cloned().collect::<Vec<_>>().join(", ")
        )];
        StrategyOutput {
            hits: vec![BucketHit::new(
                Bucket::Term,
                courses,
                ctx.intent.confidence_of(IntentField::Terms),
            )],
            explanation,
        }
    }
}
