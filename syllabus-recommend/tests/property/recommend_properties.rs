use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use proptest::prelude::*;
use syllabus_core::config::{AliasConfig, RecommendationConfig};
use syllabus_core::{Confidence, IntentField, IntentKind, LevelRange, QueryIntent, StudentProfile};
use syllabus_index::{normalize_code, Catalog, CourseIndex, KeywordRanker, SameLevelSimilarity};
use syllabus_recommend::RecommendationEngine;
use test_fixtures::{load_fixture, GOLDEN_CATALOG};

static ENGINE: LazyLock<RecommendationEngine> = LazyLock::new(|| {
    let catalog: Catalog = load_fixture(GOLDEN_CATALOG);
    let index = Arc::new(CourseIndex::from_catalog(catalog, AliasConfig::default()).unwrap());
    RecommendationEngine::new(index.clone(), RecommendationConfig::default())
        .with_lexical(Arc::new(KeywordRanker::new(index.clone())))
        .with_similar(Arc::new(SameLevelSimilarity::new(index)))
});

fn intent() -> impl Strategy<Value = QueryIntent> {
    let departments = prop::sample::subsequence(vec!["MATH", "COMPSCI", "STAT", "BIO"], 0..3);
    let levels = prop::sample::subsequence(vec![(1, 99), (100, 199), (130, 139), (120, 129)], 0..2);
    let terms = prop::sample::subsequence(vec!["Fall", "Spring 2026", "Winter"], 0..2);
    let words = prop::sample::subsequence(vec!["topology", "probability", "programming", "easy"], 0..3);
    let max_hours = prop::option::of(1.0f64..20.0);
    let min_score = prop::option::of(3.0f64..5.0);
    let prefs = prop::sample::subsequence(vec!["easy", "hard", "interest:algebra"], 0..2);
    (departments, levels, terms, words, max_hours, min_score, prefs).prop_map(
        |(departments, levels, terms, words, max_hours, min_score, prefs)| {
            let mut intent = QueryIntent::new(words.join(" "));
            intent.intent_kind = IntentKind::Recommendation;
            intent.departments = departments.into_iter().map(String::from).collect();
            intent.level_ranges = levels.into_iter().map(|(a, b)| LevelRange::new(a, b)).collect();
            intent.terms = terms.into_iter().map(String::from).collect();
            intent.constraints.max_hours = max_hours;
            intent.constraints.min_score = min_score;
            intent.preferences = prefs.into_iter().map(String::from).collect();
            for field in IntentField::ALL {
                if intent.is_populated(field) {
                    intent.set_confidence(field, Confidence::new(0.8));
                }
            }
            intent
        },
    )
}

fn profile() -> impl Strategy<Value = StudentProfile> {
    let concentration = prop::option::of(prop::sample::select(vec![
        "Mathematics",
        "Computer Science",
        "Economics",
    ]));
    let taken = prop::sample::subsequence(
        vec!["math 131", "MATH 132", "Math136", "COMPSCI 50", "COMPSCI 120", "STAT 110"],
        0..4,
    );
    (concentration, taken).prop_map(|(concentration, taken)| StudentProfile {
        concentration: concentration.map(String::from),
        courses_taken: taken.into_iter().map(String::from).collect(),
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn taken_courses_are_never_recommended(intent in intent(), profile in profile()) {
        let rec = ENGINE.recommend(&intent, &profile, None);
        let taken: HashSet<String> = profile
            .courses_taken
            .iter()
            .filter_map(|c| normalize_code(c))
            .collect();
        for course in rec.top.iter().chain(&rec.workload_friendly).chain(&rec.highly_rated) {
            prop_assert!(!taken.contains(&course.code), "{} was taken", course.code);
        }
        for alt in &rec.alternatives {
            prop_assert!(!taken.contains(&alt.course.code));
        }
    }

    #[test]
    fn lists_are_bounded_and_unique(intent in intent(), profile in profile()) {
        let rec = ENGINE.recommend(&intent, &profile, None);
        prop_assert!(rec.top.len() <= 5);
        prop_assert!(rec.workload_friendly.len() <= 3);
        prop_assert!(rec.highly_rated.len() <= 3);
        let codes: HashSet<&str> = rec.top.iter().map(|c| c.code.as_str()).collect();
        prop_assert_eq!(codes.len(), rec.top.len());
        for alt in &rec.alternatives {
            prop_assert!(!codes.contains(alt.course.code.as_str()));
        }
    }

    #[test]
    fn confidences_stay_in_unit_range(intent in intent(), profile in profile()) {
        let rec = ENGINE.recommend(&intent, &profile, None);
        for value in rec.confidence.values() {
            prop_assert!((0.0..=1.0).contains(value));
        }
        if rec.top.is_empty() {
            prop_assert_eq!(rec.confidence["overall"], 0.0);
        }
    }

    #[test]
    fn recommendation_is_deterministic(intent in intent(), profile in profile()) {
        prop_assert_eq!(
            ENGINE.recommend(&intent, &profile, None),
            ENGINE.recommend(&intent, &profile, None)
        );
    }
}
