//! RetrievalEngine: strategies → fusion → ranking → verification.

use std::sync::Arc;

use rayon::prelude::*;
use syllabus_core::config::RetrievalConfig;
use syllabus_core::traits::{ILexicalRanker, ISemanticRanker};
use syllabus_core::{Bucket, QueryIntent, RetrievalResult, StudentProfile};
use syllabus_index::CourseIndex;
use tracing::{debug, info};

use crate::fusion::fuse;
use crate::ranking::{wants_all, RankingPipeline};
use crate::strategy::{
    run_guarded, ExplicitStrategy, IRetrievalStrategy, LexicalStrategy, SemanticStrategy,
    StrategyContext, StrategyOutput, StructuredStrategy, TermStrategy,
};
use crate::verification::verify;

/// Runs the five strategies against a shared [`CourseIndex`] and fuses them
/// into one ranked [`RetrievalResult`].
///
/// Never fails: a strategy that finds nothing, times out or panics
/// contributes an empty bucket at zero confidence.
pub struct RetrievalEngine {
    index: Arc<CourseIndex>,
    config: RetrievalConfig,
    ranking: RankingPipeline,
    lexical: LexicalStrategy,
    semantic: SemanticStrategy,
}

impl RetrievalEngine {
    pub fn new(index: Arc<CourseIndex>, config: RetrievalConfig) -> Self {
        Self {
            index,
            ranking: RankingPipeline::new(&config),
            config,
            lexical: LexicalStrategy::default(),
            semantic: SemanticStrategy::default(),
        }
    }

    pub fn with_lexical(mut self, ranker: Arc<dyn ILexicalRanker>) -> Self {
        self.lexical = LexicalStrategy::new(Some(ranker));
        self
    }

    pub fn with_semantic(mut self, ranker: Arc<dyn ISemanticRanker>) -> Self {
        self.semantic = SemanticStrategy::new(Some(ranker));
        self
    }

    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Run every strategy, fuse, rank and verify.
    pub fn retrieve(&self, intent: &QueryIntent, profile: &StudentProfile) -> RetrievalResult {
        let ctx = StrategyContext {
            index: &self.index,
            intent,
            profile,
            config: &self.config,
        };
        let strategies: [&dyn IRetrievalStrategy; 5] = [
            &ExplicitStrategy,
            &StructuredStrategy,
            &TermStrategy,
            &self.lexical,
            &self.semantic,
        ];

        // Outputs come back in strategy order either way.
        let outputs: Vec<StrategyOutput> = if self.config.parallel_strategies {
            strategies.par_iter().map(|s| run_guarded(*s, &ctx)).collect()
        } else {
            strategies.iter().map(|s| run_guarded(*s, &ctx)).collect()
        };

        let mut result = RetrievalResult::empty();
        for bucket in Bucket::ALL {
            result.buckets.insert(bucket, Vec::new());
            result.confidence.insert(bucket, 0.0);
        }
        for output in outputs {
            result.explanation.extend(output.explanation);
            for hit in output.hits {
                result.confidence.insert(hit.bucket, hit.confidence.rounded());
                result.buckets.insert(hit.bucket, hit.courses);
            }
        }

        let fusion = fuse(&result.buckets, self.config.rrf_k);
        let candidates = fusion.candidates.len();
        match fusion.seed {
            Some(seed) => result
                .explanation
                .push(format!("fusion: seeded from {seed}, {candidates} candidate(s)")),
            None => result
                .explanation
                .push("fusion: every bucket is empty".to_string()),
        }

        let ranked = self.ranking.rank(fusion.candidates, intent, profile, &self.index);
        debug!(top_score = ?ranked.first().map(|s| s.score), "ranking complete");
        result.fused_ranking = ranked.into_iter().map(|s| s.course).collect();
        if candidates > 0 {
            let line = if wants_all(&intent.raw_text) {
                format!("ranking: all {candidates} candidate(s) kept on request")
            } else {
                format!(
                    "ranking: kept {} of {candidates} candidate(s)",
                    result.fused_ranking.len()
                )
            };
            result.explanation.push(line);
        }

        result.verification = verify(&result.fused_ranking, intent, profile);

        info!(
            intent = %intent.intent_kind,
            seed = %fusion.seed.map_or_else(|| "none".to_string(), |s| s.to_string()),
            candidates,
            returned = result.fused_ranking.len(),
            warnings = result.verification.len(),
            "retrieval complete"
        );
        result
    }
}
