use proptest::prelude::*;
use syllabus_core::models::ChatTurn;
use syllabus_core::{IntentField, QueryIntent};
use syllabus_query::QueryInterpreter;

fn fragment() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "recommend",
        "an easy",
        "hard",
        "math",
        "cs",
        "econ",
        "in the 130s",
        "100-level",
        "130 to 139",
        "like 131",
        "MATH 21a",
        "cs50",
        "this fall",
        "spring 2026",
        "f24",
        "under 8 hours",
        "rating above 4",
        "chill",
        "well-rated",
        "what about",
        "those",
        "compare",
        "requirements",
        "schedule",
        "interested in machine learning",
        "not too hard",
        "?",
    ])
    .prop_map(String::from)
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..8).prop_map(|parts| parts.join(" "))
}

fn turns() -> impl Strategy<Value = Vec<ChatTurn>> {
    prop::collection::vec(
        (any::<bool>(), query()).prop_map(|(assistant, text)| {
            if assistant {
                ChatTurn::assistant(format!("{text} MATH 131"))
            } else {
                ChatTurn::user(text)
            }
        }),
        0..4,
    )
}

fn all_in_unit_interval(intent: &QueryIntent) -> bool {
    intent.confidence.values().all(|c| (0.0..=1.0).contains(c))
}

proptest! {
    #[test]
    fn confidences_stay_in_unit_interval(text in query(), history in turns()) {
        let interpreter = QueryInterpreter::default();
        let first = interpreter.interpret(&text, &[], None);
        prop_assert!(all_in_unit_interval(&first));
        let second = interpreter.interpret(&text, &history, Some(&first));
        prop_assert!(all_in_unit_interval(&second));
    }

    #[test]
    fn interpretation_is_deterministic(text in query(), history in turns()) {
        let interpreter = QueryInterpreter::default();
        let a = serde_json::to_string(&interpreter.interpret(&text, &history, None)).unwrap();
        let b = serde_json::to_string(&interpreter.interpret(&text, &history, None)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn populated_fields_have_positive_confidence(text in query()) {
        let intent = QueryInterpreter::default().interpret(&text, &[], None);
        for field in IntentField::ALL {
            if field != IntentField::IsFollowup && intent.is_populated(field) {
                prop_assert!(intent.confidence_of(field).value() > 0.0, "{:?}", field);
            }
        }
    }

    #[test]
    fn inherited_fields_never_exceed_their_source(first_text in query(), history in turns()) {
        let interpreter = QueryInterpreter::default();
        let previous = interpreter.interpret(&first_text, &[], None);
        let intent = interpreter.interpret("what about those", &history, Some(&previous));
        for field in [
            IntentField::Departments,
            IntentField::LevelRanges,
            IntentField::CourseCodes,
            IntentField::Terms,
        ] {
            if intent.is_populated(field) {
                prop_assert!(
                    intent.confidence_of(field).value() <= previous.confidence_of(field).value(),
                    "{:?}",
                    field
                );
            }
        }
    }
}
