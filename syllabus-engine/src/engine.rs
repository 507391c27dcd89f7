//! CourseEngine: owns the index, the three stage engines and the cache.

use std::path::Path;
use std::sync::Arc;

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::IndexError;
use syllabus_core::models::ChatTurn;
use syllabus_core::traits::{ILexicalRanker, ISemanticRanker, ISimilarCourses};
use syllabus_core::{QueryIntent, Recommendation, RetrievalResult, StudentProfile, SyllabusResult};
use syllabus_index::{Catalog, CourseIndex, KeywordRanker, SameLevelSimilarity};
use syllabus_query::QueryInterpreter;
use syllabus_recommend::{RecommendationEngine, SharedRecommendationCache};
use syllabus_retrieval::RetrievalEngine;
use tracing::info;

use crate::context::AnswerContext;

/// External capabilities the engines call out to. `None` means the
/// capability is absent and its strategy contributes nothing.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub lexical: Option<Arc<dyn ILexicalRanker>>,
    pub semantic: Option<Arc<dyn ISemanticRanker>>,
    pub similar: Option<Arc<dyn ISimilarCourses>>,
}

impl Collaborators {
    /// The in-crate keyword ranker and same-level similarity, no semantic ranker.
    pub fn reference(index: &Arc<CourseIndex>) -> Self {
        Self {
            lexical: Some(Arc::new(KeywordRanker::new(Arc::clone(index)))),
            semantic: None,
            similar: Some(Arc::new(SameLevelSimilarity::new(Arc::clone(index)))),
        }
    }

    pub fn with_semantic(mut self, ranker: Arc<dyn ISemanticRanker>) -> Self {
        self.semantic = Some(ranker);
        self
    }
}

/// Everything one user turn produced.
#[derive(Debug, Clone)]
pub struct EngineTurn {
    pub intent: QueryIntent,
    pub retrieval: RetrievalResult,
    pub recommendation: Recommendation,
    pub context: AnswerContext,
}

/// Pipeline facade. Cheap to share behind an `Arc`; every method takes `&self`.
pub struct CourseEngine {
    index: Arc<CourseIndex>,
    config: SyllabusConfig,
    interpreter: QueryInterpreter,
    retrieval: RetrievalEngine,
    recommendation: RecommendationEngine,
    cache: Arc<SharedRecommendationCache>,
}

impl CourseEngine {
    /// Engine over `index` with the reference collaborators.
    pub fn new(index: Arc<CourseIndex>, config: SyllabusConfig) -> Self {
        let collaborators = Collaborators::reference(&index);
        Self::with_collaborators(index, config, collaborators)
    }

    pub fn with_collaborators(
        index: Arc<CourseIndex>,
        config: SyllabusConfig,
        collaborators: Collaborators,
    ) -> Self {
        let cache = Arc::new(SharedRecommendationCache::from_config(&config.recommendation));

        let mut retrieval = RetrievalEngine::new(Arc::clone(&index), config.retrieval.clone());
        let mut recommendation =
            RecommendationEngine::new(Arc::clone(&index), config.recommendation.clone())
                .with_cache(cache.clone());
        if let Some(lexical) = collaborators.lexical {
            retrieval = retrieval.with_lexical(Arc::clone(&lexical));
            recommendation = recommendation.with_lexical(lexical);
        }
        if let Some(semantic) = collaborators.semantic {
            retrieval = retrieval.with_semantic(Arc::clone(&semantic));
            recommendation = recommendation.with_semantic(semantic);
        }
        if let Some(similar) = collaborators.similar {
            recommendation = recommendation.with_similar(similar);
        }

        Self {
            interpreter: QueryInterpreter::new(config.interpreter.clone()),
            index,
            config,
            retrieval,
            recommendation,
            cache,
        }
    }

    /// Build the index from a catalog JSON document.
    pub fn from_catalog_json(json: &str, config: SyllabusConfig) -> SyllabusResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        let index = CourseIndex::from_catalog(catalog, config.aliases.clone())?;
        Ok(Self::new(Arc::new(index), config))
    }

    /// Load config (file, then `SYLLABUS_*` overrides) and a catalog JSON file.
    pub fn open(catalog_path: &Path, config_path: Option<&Path>) -> SyllabusResult<Self> {
        let config = SyllabusConfig::load(config_path)?;
        let json = std::fs::read_to_string(catalog_path).map_err(|e| IndexError::CatalogUnreadable {
            path: catalog_path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_catalog_json(&json, config)
    }

    pub fn index(&self) -> &Arc<CourseIndex> {
        &self.index
    }

    pub fn config(&self) -> &SyllabusConfig {
        &self.config
    }

    pub fn cache(&self) -> &SharedRecommendationCache {
        &self.cache
    }

    pub fn interpret(
        &self,
        raw: &str,
        recent_turns: &[ChatTurn],
        previous: Option<&QueryIntent>,
    ) -> QueryIntent {
        self.interpreter.interpret(raw, recent_turns, previous)
    }

    pub fn retrieve(&self, intent: &QueryIntent, profile: &StudentProfile) -> RetrievalResult {
        self.retrieval.retrieve(intent, profile)
    }

    pub fn recommend(
        &self,
        intent: &QueryIntent,
        profile: &StudentProfile,
        retrieval: Option<&RetrievalResult>,
    ) -> Recommendation {
        self.recommendation.recommend(intent, profile, retrieval)
    }

    pub fn answer_context(
        &self,
        intent: &QueryIntent,
        retrieval: &RetrievalResult,
        recommendation: &Recommendation,
        profile: &StudentProfile,
    ) -> AnswerContext {
        AnswerContext::build(&self.index, intent, retrieval, recommendation, profile)
    }

    /// Run one turn end to end. The caller keeps `intent` to pass back as
    /// `previous` on the next turn.
    pub fn ask(
        &self,
        raw: &str,
        recent_turns: &[ChatTurn],
        previous: Option<&QueryIntent>,
        profile: &StudentProfile,
    ) -> EngineTurn {
        let span = tracing::info_span!("ask", followup = previous.is_some());
        let _guard = span.enter();

        let intent = self.interpret(raw, recent_turns, previous);
        let retrieval = self.retrieve(&intent, profile);
        let recommendation = self.recommend(&intent, profile, Some(&retrieval));
        let context = self.answer_context(&intent, &retrieval, &recommendation, profile);

        info!(
            intent = %intent.intent_kind,
            fused = retrieval.fused_ranking.len(),
            recommended = recommendation.top.len(),
            cache_hit_rate = self.cache.hit_rate(),
            "turn complete"
        );
        EngineTurn {
            intent,
            retrieval,
            recommendation,
            context,
        }
    }
}
