use std::sync::Arc;
use std::time::Duration;

use syllabus_core::errors::BackendError;
use syllabus_core::traits::ISemanticRanker;
use syllabus_core::{Bucket, Confidence};

use super::{BucketHit, IRetrievalStrategy, StrategyContext, StrategyOutput};
use crate::backend::{call_bounded, or_empty};
use crate::expansion::semantic_query;

/// Embedding similarity through the injected [`ISemanticRanker`], queried
/// with the preference-expanded text.
#[derive(Clone, Default)]
pub struct SemanticStrategy {
    ranker: Option<Arc<dyn ISemanticRanker>>,
}

impl SemanticStrategy {
    pub fn new(ranker: Option<Arc<dyn ISemanticRanker>>) -> Self {
        Self { ranker }
    }
}

impl IRetrievalStrategy for SemanticStrategy {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput {
        let Some(ranker) = self.ranker.clone() else {
            return StrategyOutput::skipped("semantic: no ranker configured");
        };
        let backend = ranker.name().to_string();
        let query = semantic_query(ctx.intent);
        let top_k = ctx.config.semantic_top_k;

        let result = if ranker.is_available() {
            call_bounded(
                &backend,
                Duration::from_millis(ctx.config.backend_timeout_ms),
                move || ranker.rank(&query, top_k),
            )
        } else {
            Err(BackendError::Unavailable {
                backend: backend.clone(),
            })
        };

        let (courses, error) = or_empty(result);
        let line = match &error {
            Some(e) => format!("semantic: {e}"),
            None => format!("semantic: {backend} returned {} course(s)", courses.len()),
        };
        StrategyOutput {
            hits: vec![BucketHit::new(
                Bucket::Semantic,
                courses,
                Confidence::new(ctx.config.semantic_confidence),
            )],
            explanation: vec![line],
        }
    }
}
