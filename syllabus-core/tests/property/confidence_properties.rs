use proptest::prelude::*;
use syllabus_core::confidence::{all_of, any_of};
use syllabus_core::{Confidence, Penalty};

fn penalty_strategy() -> impl Strategy<Value = Penalty> {
    prop_oneof![
        (0.0f64..=1.0).prop_map(Penalty::Inherited),
        Just(Penalty::MissingExplicitCode),
        Just(Penalty::MissingReferencedCode),
        Just(Penalty::AdjustedToDecade),
        Just(Penalty::MultipleValues),
        Just(Penalty::ConcentrationSubstitute),
        Just(Penalty::Relaxed),
        Just(Penalty::Fallback),
    ]
}

proptest! {
    #[test]
    fn new_always_in_unit_interval(x in proptest::num::f64::ANY) {
        let c = Confidence::new(x).value();
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn penalties_never_increase(x in 0.0f64..=1.0, p in penalty_strategy()) {
        let c = Confidence::new(x);
        prop_assert!(c.penalize(p).value() <= c.value());
    }

    #[test]
    fn and_bounded_by_inputs(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (ca, cb) = (Confidence::new(a), Confidence::new(b));
        let and = ca.and(cb).value();
        let or = ca.or(cb).value();
        prop_assert!(and <= a && and <= b);
        prop_assert!(or >= a && or >= b);
        prop_assert!(and <= or);
    }

    #[test]
    fn combinations_stay_in_range(values in proptest::collection::vec(0.0f64..=1.0, 0..16)) {
        let cs: Vec<Confidence> = values.iter().copied().map(Confidence::new).collect();
        let any = any_of(cs.clone()).value();
        let all = all_of(cs).value();
        prop_assert!((0.0..=1.0).contains(&any));
        prop_assert!((0.0..=1.0).contains(&all));
        prop_assert!(all <= any);
    }

    #[test]
    fn rounded_stays_close(x in 0.0f64..=1.0) {
        let c = Confidence::new(x);
        prop_assert!((c.rounded() - c.value()).abs() <= 0.0005 + f64::EPSILON);
    }
}
