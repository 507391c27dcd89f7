use std::sync::Arc;
use std::time::Duration;

use syllabus_core::errors::BackendError;
use syllabus_core::traits::ILexicalRanker;
use syllabus_core::{Bucket, Confidence};

use super::{BucketHit, IRetrievalStrategy, StrategyContext, StrategyOutput};
use crate::backend::{call_bounded, or_empty};
use crate::expansion::lexical_query;

/// Keyword relevance through the injected [`ILexicalRanker`].
///
/// No ranker, an unavailable ranker, a timeout or an error all mean an empty
/// bucket at zero confidence.
#[derive(Clone, Default)]
pub struct LexicalStrategy {
    ranker: Option<Arc<dyn ILexicalRanker>>,
}

impl LexicalStrategy {
    pub fn new(ranker: Option<Arc<dyn ILexicalRanker>>) -> Self {
        Self { ranker }
    }
}

impl IRetrievalStrategy for LexicalStrategy {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput {
        let Some(ranker) = self.ranker.clone() else {
            return StrategyOutput::skipped("lexical: no ranker configured");
        };
        let backend = ranker.name().to_string();
        let query = lexical_query(ctx.intent);
        let top_k = ctx.config.lexical_top_k;

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
            Some(e) => format!("lexical: {e}"),
            None => format!("lexical: {backend} returned {} course(s)", courses.len()),
        };
        StrategyOutput {
            hits: vec![BucketHit::new(
                Bucket::Lexical,
                courses,
                Confidence::new(ctx.config.lexical_confidence),
            )],
            explanation: vec![line],
        }
    }
}
