use proptest::prelude::*;
use syllabus_core::config::AliasConfig;
use syllabus_index::{normalize_code, parse_code, CourseIndex, CourseRecord};

fn dept() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["MATH", "COMPSCI", "ECON", "STAT", "GOV"]).prop_map(String::from)
}

fn seasons() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Fall 2025", "2025 Fall", "fall 2024", "Spring 2026", "SPRING 2025"])
        .prop_map(String::from)
}

fn rows() -> impl Strategy<Value = Vec<(String, u32, String, String)>> {
    prop::collection::vec(
        (dept(), 1u32..400, prop::sample::select(vec!["", "A", "B"]).prop_map(String::from), seasons()),
        1..40,
    )
}

fn build(rows: &[(String, u32, String, String)]) -> CourseIndex {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, (d, n, s, term))| CourseRecord {
            course_id: Some(i as u64),
            // Messy spacing and case on purpose.
            code: Some(format!("  {}   {}{} ", d.to_lowercase(), n, s.to_lowercase())),
            title: Some(format!("Course {i}")),
            term: Some(term.clone()),
            ..Default::default()
        })
        .collect();
    CourseIndex::build(records, AliasConfig::default(), Vec::new()).unwrap()
}

proptest! {
    #[test]
    fn by_code_finds_every_inserted_course(rows in rows()) {
        let index = build(&rows);
        for course in index.courses() {
            let key = normalize_code(&course.code).unwrap();
            prop_assert!(index.by_code(&key).is_some());
            prop_assert_eq!(&index.by_code(&key).unwrap().code, &course.code);
        }
    }

    #[test]
    fn singleton_range_matches_exact_number(rows in rows(), probe in 1u32..400) {
        let index = build(&rows);
        for course in index.courses() {
            let parsed = parse_code(&course.code).unwrap();
            let hits = index.by_level_range(&parsed.department, probe, probe);
            let included = hits.iter().any(|c| c.course_id == course.course_id);
            prop_assert_eq!(included, parsed.number == probe);
        }
    }

    #[test]
    fn fall_matches_every_fall_token(rows in rows()) {
        let index = build(&rows);
        let hits: Vec<u64> = index.by_term("Fall").iter().map(|c| c.course_id).collect();
        for course in index.courses() {
            let has = course.term.split_whitespace().any(|t| t.eq_ignore_ascii_case("fall"));
            prop_assert_eq!(hits.contains(&course.course_id), has);
        }
    }

    #[test]
    fn normalize_is_idempotent(raw in "[a-zA-Z]{2,7}[ \t]{0,3}[0-9]{1,4}[a-zA-Z]?") {
        let once = normalize_code(&raw).unwrap();
        prop_assert_eq!(normalize_code(&once).unwrap(), once);
    }
}
