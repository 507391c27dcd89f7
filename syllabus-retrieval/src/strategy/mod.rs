//! Retrieval strategies behind one capability interface.
//!
//! Strategies are independent of each other. Each returns zero or more
//! bucket hits with a confidence and must never fail; [`run_guarded`] turns a
//! panicking strategy into an empty output.

pub mod explicit;
pub mod lexical;
pub mod semantic;
pub mod structured;
pub mod term;

use std::panic::{catch_unwind, AssertUnwindSafe};

use syllabus_core::config::RetrievalConfig;
use syllabus_core::{Bucket, Confidence, Course, QueryIntent, StudentProfile};
use syllabus_index::CourseIndex;
use tracing::{debug, warn};

pub use explicit::ExplicitStrategy;
pub use lexical::LexicalStrategy;
pub use semantic::SemanticStrategy;
pub use structured::StructuredStrategy;
pub use term::TermStrategy;

/// Read-only inputs shared by every strategy in one pass.
#[derive(Clone, Copy)]
pub struct StrategyContext<'a> {
    pub index: &'a CourseIndex,
    pub intent: &'a QueryIntent,
    pub profile: &'a StudentProfile,
    pub config: &'a RetrievalConfig,
}

/// One bucket filled by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketHit {
    pub bucket: Bucket,
    pub courses: Vec<Course>,
    pub confidence: Confidence,
}

impl BucketHit {
    /// Empty buckets always carry zero confidence.
    pub fn new(bucket: Bucket, courses: Vec<Course>, confidence: Confidence) -> Self {
        let confidence = if courses.is_empty() {
            Confidence::NONE
        } else {
            confidence
        };
        Self {
            bucket,
            courses,
            confidence,
        }
    }
}

/// What a strategy produced plus a line for the explanation trail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutput {
    pub hits: Vec<BucketHit>,
    pub explanation: Vec<String>,
}

impl StrategyOutput {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            hits: Vec::new(),
            explanation: vec![reason.into()],
        }
    }
}

/// A retrieval strategy: `(intent, profile) -> (results, confidence)`.
pub trait IRetrievalStrategy: Send + Sync {
    /// Strategy name used in logs and explanations.
    fn name(&self) -> &'static str;

    /// Run against `ctx`. Must not fail; "nothing found" is an empty output.
    fn run(&self, ctx: &StrategyContext<'_>) -> StrategyOutput;
}

/// Run `strategy`, converting a panic into an empty output.
pub fn run_guarded(strategy: &dyn IRetrievalStrategy, ctx: &StrategyContext<'_>) -> StrategyOutput {
    match catch_unwind(AssertUnwindSafe(|| strategy.run(ctx))) {
        Ok(output) => {
            debug!(
                strategy = strategy.name(),
                buckets = output.hits.len(),
                courses = output.hits.iter().map(|h| h.courses.len()).sum::<usize>(),
                "strategy finished"
            );
            output
        }
        Err(_) => {
            warn!(strategy = strategy.name(), "strategy panicked, treated as no results");
            StrategyOutput::skipped(format!("{}: failed internally, no results", strategy.name()))
        }
    }
}

/// Clone borrowed index rows, dropping repeats of the same `course_id`.
pub(crate) fn owned_unique<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Vec<Course> {
    let mut seen = std::collections::HashSet::new();
    courses
        .into_iter()
        .filter(|c| seen.insert(c.course_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::config::AliasConfig;

    struct Exploding;

    impl IRetrievalStrategy for Exploding {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn run(&self, _ctx: &StrategyContext<'_>) -> StrategyOutput {
            panic!("strategy bug")
        }
    }

    #[test]
    fn panicking_strategy_yields_empty_output() {
        let index = CourseIndex::from_courses(
            vec![Course {
                course_id: 1,
                code: "MATH 1A".into(),
                department: "Mathematics".into(),
                title: "Calculus".into(),
                term: "Fall 2025".into(),
                instructors: Vec::new(),
                description: String::new(),
                requirements_text: String::new(),
                mean_weekly_hours: None,
                overall_rating: None,
                student_comments: Vec::new(),
            }],
            AliasConfig::default(),
        )
        .unwrap();
        let intent = QueryIntent::new("x");
        let profile = StudentProfile::default();
        let config = RetrievalConfig::default();
        let ctx = StrategyContext {
            index: &index,
            intent: &intent,
            profile: &profile,
            config: &config,
        };
        let out = run_guarded(&Exploding, &ctx);
        assert!(out.hits.is_empty());
        assert_eq!(out.explanation.len(), 1);
    }

    #[test]
    fn empty_hits_have_zero_confidence() {
        let hit = BucketHit::new(Bucket::Term, Vec::new(), Confidence::FULL);
        assert_eq!(hit.confidence, Confidence::NONE);
    }
}
