//! End-to-end turns through the facade over the golden catalog.

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::IndexError;
use syllabus_core::models::ChatTurn;
use syllabus_core::{IntentKind, StudentProfile, SyllabusError};
use syllabus_engine::CourseEngine;
use test_fixtures::{fixture_path, GOLDEN_CATALOG};

fn engine() -> CourseEngine {
    let json = std::fs::read_to_string(fixture_path(GOLDEN_CATALOG)).unwrap();
    CourseEngine::from_catalog_json(&json, SyllabusConfig::default()).unwrap()
}

fn math_student() -> StudentProfile {
    StudentProfile::default()
        .with_concentration("Mathematics")
        .with_taken(["math 131"])
}

#[test]
fn comparison_turn_lists_specific_courses() {
    let engine = engine();
    let turn = engine.ask("Compare MATH 21a and MATH 23b", &[], None, &StudentProfile::default());

    assert_eq!(turn.intent.intent_kind, IntentKind::Comparison);
    assert!(turn.recommendation.skipped);
    let specific = turn.context.section("SPECIFIC COURSES").unwrap();
    assert_eq!(specific.lines.len(), 2);
    assert!(specific.lines[0].starts_with("MATH 21A - "));
    assert!(turn.context.section("RECOMMENDED COURSES").is_none());
    assert!(turn.context.section("RELEVANT COURSES").is_none());
}

#[test]
fn recommendation_turn_builds_full_context() {
    let engine = engine();
    let turn = engine.ask(
        "Recommend an easy math course in the 130s",
        &[],
        None,
        &math_student(),
    );

    assert!(!turn.recommendation.top.is_empty());
    assert!(turn.recommendation.top.iter().all(|c| c.code != "MATH 131"));

    let rendered = turn.context.to_string();
    assert!(rendered.starts_with("QUERY ANALYSIS:\nOriginal query: \"Recommend an easy math course in the 130s\""));
    assert!(rendered.contains("Recommendation reasons: "));
    assert!(rendered.contains("STUDENT PROFILE:\nConcentration: Mathematics\nCourses taken: math 131"));

    let requirements = turn
        .context
        .section("CONCENTRATION REQUIREMENTS FOR Mathematics")
        .unwrap();
    assert!(requirements.lines.contains(&"MATH 131".to_string()));
}

#[test]
fn follow_up_turn_carries_context() {
    let engine = engine();
    let profile = math_student();
    let first = engine.ask("Recommend a math course in the 130s", &[], None, &profile);
    let history = vec![
        ChatTurn::user("Recommend a math course in the 130s"),
        ChatTurn::assistant("You might like MATH 132 or MATH 137."),
    ];
    let second = engine.ask("what about something easier", &history, Some(&first.intent), &profile);

    assert!(second.intent.is_followup);
    assert!(second.intent.prefers_easy());
    assert!(second.context.to_string().contains("This is a follow-up question"));
}

#[test]
fn general_turn_falls_back_to_relevant_courses() {
    let engine = engine();
    let turn = engine.ask("fall 2025 courses", &[], None, &StudentProfile::default());
    if turn.recommendation.top.is_empty() && turn.retrieval.bucket(syllabus_core::Bucket::Explicit).is_empty() {
        let relevant = turn.context.section("RELEVANT COURSES").unwrap();
        assert!(!relevant.lines.is_empty());
        assert!(relevant.lines.len() <= 10);
    }
}

#[test]
fn repeated_recommendations_hit_the_cache() {
    let engine = engine();
    let profile = math_student();
    let intent = engine.interpret("Recommend an easy math course in the 130s", &[], None);
    let first = engine.recommend(&intent, &profile, None);
    let second = engine.recommend(&intent, &profile, None);
    assert_eq!(first, second);
    assert_eq!(engine.cache().hits(), 1);
}

#[test]
fn empty_catalog_is_fatal() {
    let err = CourseEngine::from_catalog_json("{}", SyllabusConfig::default()).err().unwrap();
    assert!(matches!(
        err,
        SyllabusError::Index(IndexError::EmptyCatalog { rows: 0, skipped: 0 })
    ));

    let err = CourseEngine::from_catalog_json("not json", SyllabusConfig::default()).err().unwrap();
    assert!(matches!(err, SyllabusError::Serialization(_)));
}

#[test]
fn open_reads_catalog_and_config_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::copy(fixture_path(GOLDEN_CATALOG), &catalog).unwrap();
    let config = dir.path().join("syllabus.toml");
    std::fs::write(&config, "[recommendation]\ntop_n = 2\n").unwrap();

    let engine = CourseEngine::open(&catalog, Some(&config)).unwrap();
    assert_eq!(engine.index().len(), 32);
    assert_eq!(engine.config().recommendation.top_n, 2);

    let err = CourseEngine::open(&dir.path().join("missing.json"), None).err().unwrap();
    assert!(matches!(err, SyllabusError::Index(IndexError::CatalogUnreadable { .. })));
}
