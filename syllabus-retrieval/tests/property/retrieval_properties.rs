use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use proptest::prelude::*;
use syllabus_core::config::{AliasConfig, RetrievalConfig};
use syllabus_core::{Confidence, IntentField, LevelRange, QueryIntent, StudentProfile};
use syllabus_index::{Catalog, CourseIndex, KeywordRanker};
use syllabus_retrieval::fusion::fuse;
use syllabus_retrieval::RetrievalEngine;
use test_fixtures::{load_fixture, GOLDEN_CATALOG};

static ENGINE: LazyLock<RetrievalEngine> = LazyLock::new(|| {
    let catalog: Catalog = load_fixture(GOLDEN_CATALOG);
    let index = Arc::new(CourseIndex::from_catalog(catalog, AliasConfig::default()).unwrap());
    RetrievalEngine::new(index.clone(), RetrievalConfig::default())
        .with_lexical(Arc::new(KeywordRanker::new(index)))
});

fn intent() -> impl Strategy<Value = QueryIntent> {
    let departments = prop::sample::subsequence(vec!["MATH", "COMPSCI", "STAT", "ECON", "BIO"], 0..3);
    let codes = prop::sample::subsequence(vec!["MATH 21A", "MATH 23B", "COMPSCI 50", "MATH 999"], 0..3);
    let levels = prop::sample::subsequence(
        vec![(1, 99), (100, 199), (130, 139), (20, 29), (1000, 1099)],
        0..2,
    );
    let terms = prop::sample::subsequence(vec!["Fall", "Spring", "Fall 2025", "Winter"], 0..2);
    let words = prop::sample::subsequence(
        vec!["list all", "every", "topology", "probability", "learning", "easy", "courses"],
        0..3,
    );
    let max_hours = prop::option::of(1.0f64..30.0);
    let easy = any::<bool>();
    (departments, codes, levels, terms, words, max_hours, easy).prop_map(
        |(departments, codes, levels, terms, words, max_hours, easy)| {
            let mut intent = QueryIntent::new(words.join(" "));
            intent.departments = departments.into_iter().map(String::from).collect();
            intent.course_codes = codes.into_iter().map(String::from).collect();
            intent.level_ranges = levels.into_iter().map(|(a, b)| LevelRange::new(a, b)).collect();
            intent.terms = terms.into_iter().map(String::from).collect();
            intent.constraints.max_hours = max_hours;
            if easy {
                intent.preferences.insert("easy".into());
            }
            for field in IntentField::ALL {
                if intent.is_populated(field) {
                    intent.set_confidence(field, Confidence::new(0.8));
                }
            }
            intent
        },
    )
}

proptest! {
    #[test]
    fn fused_is_deduplicated_subset_of_buckets(intent in intent()) {
        let result = ENGINE.retrieve(&intent, &StudentProfile::default());
        let union: HashSet<u64> = result
            .buckets
            .values()
            .flatten()
            .map(|c| c.course_id)
            .collect();
        let mut seen = HashSet::new();
        for course in &result.fused_ranking {
            prop_assert!(union.contains(&course.course_id));
            prop_assert!(seen.insert(course.course_id));
        }
    }

    #[test]
    fn cap_holds_unless_all_requested(intent in intent()) {
        let result = ENGINE.retrieve(&intent, &StudentProfile::default());
        let raw = intent.raw_text.to_ascii_lowercase();
        if raw.contains("all") || raw.contains("every") {
            let candidates = fuse(&result.buckets, RetrievalConfig::default().rrf_k).candidates;
            prop_assert_eq!(result.fused_ranking.len(), candidates.len());
        } else {
            prop_assert!(result.fused_ranking.len() <= RetrievalConfig::default().result_cap);
        }
    }

    #[test]
    fn confidences_are_bounded_and_zero_when_empty(intent in intent()) {
        let result = ENGINE.retrieve(&intent, &StudentProfile::default());
        for (bucket, confidence) in &result.confidence {
            prop_assert!((0.0..=1.0).contains(confidence));
            if result.bucket(*bucket).is_empty() {
                prop_assert_eq!(*confidence, 0.0);
            }
        }
    }

    #[test]
    fn retrieval_is_deterministic(intent in intent()) {
        let profile = StudentProfile::default().with_concentration("Mathematics");
        let a = ENGINE.retrieve(&intent, &profile);
        let b = ENGINE.retrieve(&intent, &profile);
        prop_assert_eq!(a, b);
    }
}
