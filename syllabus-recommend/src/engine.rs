//! RecommendationEngine: candidates → relaxation → scoring → lists →
//! reasons → alternatives → reflection.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use syllabus_core::config::RecommendationConfig;
use syllabus_core::errors::BackendError;
use syllabus_core::models::RecommendationKey;
use syllabus_core::traits::{ILexicalRanker, IRecommendationCache, ISemanticRanker, ISimilarCourses};
use syllabus_core::{
    Bucket, Confidence, Course, IntentField, IntentKind, Penalty, QueryIntent, Recommendation,
    RetrievalResult, StudentProfile,
};
use syllabus_index::CourseIndex;
use syllabus_retrieval::backend::{call_bounded, or_empty};
use syllabus_retrieval::expansion::{lexical_query, semantic_query};
use syllabus_retrieval::fusion::rrf;
use tracing::{debug, info};

use crate::alternatives;
use crate::candidates::{concentration_codes, taken_codes, CandidateGenerator, Candidates};
use crate::reasons::{reasons_for, ReasonContext};
use crate::reflection::{reflect, ReflectionInput};
use crate::relaxation::{Filters, Relaxation};
use crate::scoring;

/// RRF constant for merging the text-fallback lists.
const TEXT_RRF_K: u32 = 60;

/// Profile-aware recommender over a shared [`CourseIndex`].
///
/// Only answers `recommendation` intents; anything else gets an empty result
/// flagged as skipped. Never fails.
pub struct RecommendationEngine {
    index: Arc<CourseIndex>,
    config: RecommendationConfig,
    lexical: Option<Arc<dyn ILexicalRanker>>,
    semantic: Option<Arc<dyn ISemanticRanker>>,
    similar: Option<Arc<dyn ISimilarCourses>>,
    cache: Option<Arc<dyn IRecommendationCache>>,
}

impl RecommendationEngine {
    pub fn new(index: Arc<CourseIndex>, config: RecommendationConfig) -> Self {
        Self {
            index,
            config,
            lexical: None,
            semantic: None,
            similar: None,
            cache: None,
        }
    }

    pub fn with_lexical(mut self, ranker: Arc<dyn ILexicalRanker>) -> Self {
        self.lexical = Some(ranker);
        self
    }

    pub fn with_semantic(mut self, ranker: Arc<dyn ISemanticRanker>) -> Self {
        self.semantic = Some(ranker);
        self
    }

    pub fn with_similar(mut self, similar: Arc<dyn ISimilarCourses>) -> Self {
        self.similar = Some(similar);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn IRecommendationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.backend_timeout_ms)
    }

    /// Recommend for `intent`. A supplied `retrieval` result's lexical and
    /// semantic buckets stand in for the text fallback.
    pub fn recommend(
        &self,
        intent: &QueryIntent,
        profile: &StudentProfile,
        retrieval: Option<&RetrievalResult>,
    ) -> Recommendation {
        if intent.intent_kind != IntentKind::Recommendation {
            debug!(intent = %intent.intent_kind, "not a recommendation request, skipped");
            return Recommendation::skipped(format!(
                "Recommendations skipped: the request is {}, not a recommendation",
                intent.intent_kind
            ));
        }

        let key = RecommendationKey::from_request(intent, profile);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key) {
                debug!("recommendation served from cache");
                return hit;
            }
        }

        let recommendation = self.compute(intent, profile, retrieval);
        if let Some(cache) = &self.cache {
            cache.insert(key, recommendation.clone());
        }
        recommendation
    }

    fn compute(
        &self,
        intent: &QueryIntent,
        profile: &StudentProfile,
        retrieval: Option<&RetrievalResult>,
    ) -> Recommendation {
        let taken = taken_codes(profile);
        let concentration = concentration_codes(&self.index, profile);
        let generator = CandidateGenerator::new(&self.index, intent, &taken, &concentration, || {
            self.text_candidates(intent, retrieval)
        });

        let (found, relaxations) = self.generate_with_relaxation(&generator, intent);
        let mut rec = Recommendation::empty();

        let (courses, candidate_confidence, source) = match found {
            Some(Candidates {
                courses,
                source,
                confidence,
            }) => (courses, confidence, Some(source)),
            None => (Vec::new(), Confidence::NONE, None),
        };
        let candidate_confidence =
            candidate_confidence.penalize_n(Penalty::Relaxed, relaxations.len());

        let ranked = scoring::rank(courses, intent, profile, &concentration);
        let pool: Vec<Course> = ranked.iter().map(|s| s.course.clone()).collect();
        rec.top = pool.iter().take(self.config.top_n).cloned().collect();
        rec.workload_friendly = workload_friendly(&pool, self.config.derived_list_len);
        rec.highly_rated = highly_rated(&pool, self.config.derived_list_len);

        let reason_ctx = ReasonContext {
            profile,
            taken: &taken,
            concentration: &concentration,
            terms: &intent.terms,
        };
        for course in rec
            .top
            .iter()
            .chain(&rec.workload_friendly)
            .chain(&rec.highly_rated)
        {
            if !rec.reasons.contains_key(&course.code) {
                rec.reasons
                    .insert(course.code.clone(), reasons_for(course, &reason_ctx));
            }
        }

        if let Some(similar) = &self.similar {
            let bases = &rec.top[..rec.top.len().min(self.config.alternatives_for_top)];
            rec.alternatives = alternatives::find(
                similar,
                bases,
                &rec.top,
                self.config.alternatives_per_course,
                self.timeout(),
                &reason_ctx,
            );
        }

        let intent_confidence = intent.confidence_of(IntentField::Intent);
        let overall = if rec.top.is_empty() {
            Confidence::NONE
        } else {
            candidate_confidence.and(intent_confidence)
        };
        rec.confidence.insert("intent".to_string(), intent_confidence.rounded());
        rec.confidence
            .insert("candidates".to_string(), candidate_confidence.rounded());
        rec.confidence.insert("overall".to_string(), overall.rounded());

        rec.self_reflection = reflect(
            &ReflectionInput {
                top: &rec.top,
                intent,
                profile,
                taken: &taken,
                concentration: &concentration,
                overall,
                relaxations: &relaxations,
            },
            &self.config,
        );

        info!(
            source = %source.map_or_else(|| "none".to_string(), |s| s.to_string()),
            relaxations = relaxations.len(),
            top = rec.top.len(),
            alternatives = rec.alternatives.len(),
            overall = overall.rounded(),
            "recommendation complete"
        );
        rec
    }

    /// Try the sources with the stated filters, then walk the relaxation
    /// ladder. Returns the candidates and the steps that were needed.
    fn generate_with_relaxation(
        &self,
        generator: &CandidateGenerator<'_>,
        intent: &QueryIntent,
    ) -> (Option<Candidates>, Vec<String>) {
        let mut filters = Filters::from_intent(intent);
        if let Some(found) = generator.generate(&filters) {
            return (Some(found), Vec::new());
        }

        let mut applied = Vec::new();
        for step in Relaxation::LADDER {
            let Some(next) = step.apply(&filters, &self.config) else {
                continue;
            };
            filters = next;
            applied.push(step.to_string());
            debug!(step = %step, "relaxing recommendation filters");
            if let Some(found) = generator.generate(&filters) {
                return (Some(found), applied);
            }
        }
        (None, applied)
    }

    /// Lexical and semantic rankings merged with RRF. Uses the retrieval
    /// buckets when given, otherwise calls the rankers directly.
    fn text_candidates(&self, intent: &QueryIntent, retrieval: Option<&RetrievalResult>) -> Vec<Course> {
        if let Some(result) = retrieval {
            let lexical = result.bucket(Bucket::Lexical);
            let semantic = result.bucket(Bucket::Semantic);
            if !lexical.is_empty() || !semantic.is_empty() {
                return rrf(&[lexical, semantic], TEXT_RRF_K);
            }
        }

        let top_k = self.config.top_n * 4;
        let lexical = self.lexical.as_ref().map(|ranker| {
            let ranker = Arc::clone(ranker);
            let query = lexical_query(intent);
            let result = if ranker.is_available() {
                let name = ranker.name().to_string();
                call_bounded(&name, self.timeout(), move || ranker.rank(&query, top_k))
            } else {
                Err(BackendError::Unavailable {
                    backend: ranker.name().to_string(),
                })
            };
            or_empty(result).0
        });
        let semantic = self.semantic.as_ref().map(|ranker| {
            let ranker = Arc::clone(ranker);
            let query = semantic_query(intent);
            let result = if ranker.is_available() {
                let name = ranker.name().to_string();
                call_bounded(&name, self.timeout(), move || ranker.rank(&query, top_k))
            } else {
                Err(BackendError::Unavailable {
                    backend: ranker.name().to_string(),
                })
            };
            or_empty(result).0
        });
        rrf(
            &[
                lexical.as_deref().unwrap_or(&[]),
                semantic.as_deref().unwrap_or(&[]),
            ],
            TEXT_RRF_K,
        )
    }
}

/// Lightest first, unknown workload last.
pub fn workload_friendly(pool: &[Course], len: usize) -> Vec<Course> {
    let mut sorted: Vec<&Course> = pool.iter().collect();
    sorted.sort_by(|a, b| match (a.mean_weekly_hours, b.mean_weekly_hours) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.into_iter().take(len).cloned().collect()
}

/// Best rated first, unknown rating last.
pub fn highly_rated(pool: &[Course], len: usize) -> Vec<Course> {
    let mut sorted: Vec<&Course> = pool.iter().collect();
    sorted.sort_by(|a, b| match (a.overall_rating, b.overall_rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.into_iter().take(len).cloned().collect()
}
