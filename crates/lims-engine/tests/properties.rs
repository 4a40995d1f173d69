//! Property tests for band math and generated rule partitions.

use proptest::prelude::*;

use lims_engine::{
    Mode, ParamSpec, active_bands, build_rules, compute_bounds, limit3_threshold, mineral_bands,
    quantize2,
};
use lims_model::{Linker, Operator, Rule};

/// Evaluates a generated rule's comparison clauses against a measured value.
fn rule_matches(rule: &Rule, x: f64) -> bool {
    let clause = |operator: Operator, value: f64| match operator {
        Operator::Le => x <= value,
        Operator::Lt => x < value,
        Operator::Ge => x >= value,
        Operator::Gt => x > value,
        Operator::Eq => x == value,
        Operator::Ne => x != value,
    };
    let first = clause(
        rule.operator.expect("generated rule has operator"),
        rule.value.as_f64().expect("numeric value"),
    );
    match (rule.linker, rule.operator2) {
        (Some(Linker::And), Some(op2)) => {
            first && clause(op2, rule.value2.as_f64().expect("numeric value2"))
        }
        (Some(Linker::Or), Some(op2)) => {
            first || clause(op2, rule.value2.as_f64().expect("numeric value2"))
        }
        _ => first,
    }
}

proptest! {
    #[test]
    fn active_band_boundaries_are_ordered(target in 0.001f64..100_000.0) {
        let bands = active_bands(target);
        prop_assert!(bands.low_ok <= bands.low_perfect);
        prop_assert!(bands.low_perfect <= bands.high_perfect);
        prop_assert!(bands.high_perfect <= bands.high_ok2);
        prop_assert!(bands.low_ok >= 0.0);
    }

    #[test]
    fn mineral_band_stays_below_active(target in 0.001f64..100_000.0) {
        let mineral = mineral_bands(target);
        let active = active_bands(target);
        prop_assert!(mineral.high_ok2 <= active.high_ok2);
        prop_assert!(mineral.high_perfect <= mineral.high_ok2);
    }

    #[test]
    fn limit3_threshold_stays_below_target(target in 0.001f64..100_000.0) {
        let threshold = limit3_threshold(target);
        prop_assert!(threshold >= 0.0);
        prop_assert!(threshold <= quantize2(target));
    }

    #[test]
    fn clamped_lower_bound_is_never_negative(
        target in 0.0f64..1_000.0,
        deviation in 0.0f64..2_000.0,
    ) {
        let bounds = compute_bounds(target, deviation);
        prop_assert!(bounds.lower >= 0.0);
        prop_assert!(bounds.upper >= bounds.lower);
    }

    /// The four active rules partition [0, ∞): every value matches exactly
    /// one rule, at boundaries included.
    #[test]
    fn active_rules_partition_the_axis(
        target in 0.01f64..10_000.0,
        factor in 0.0f64..3.0,
    ) {
        let spec = ParamSpec {
            parametertype_id: 42,
            unit: None,
            mode: Mode::Active { target },
        };
        let rules = build_rules(&spec, 7).unwrap();
        let x = quantize2(factor * target);
        let matching = rules.iter().filter(|r| rule_matches(&r.data, x)).count();
        prop_assert_eq!(matching, 1, "value {} matched {} rules", x, matching);
    }

    #[test]
    fn limit3_rules_cover_the_axis(
        target in 0.01f64..10_000.0,
        factor in 0.0f64..2.0,
    ) {
        let spec = ParamSpec {
            parametertype_id: 42,
            unit: None,
            mode: Mode::Limit3 { target },
        };
        let rules = build_rules(&spec, 7).unwrap();
        let x = quantize2(factor * target);
        let matching = rules.iter().filter(|r| rule_matches(&r.data, x)).count();
        // The OK band shares its boundaries with both neighbors, so edge
        // values may match two rules, but never zero.
        prop_assert!(matching >= 1, "value {} matched no rule", x);
    }

    #[test]
    fn generated_rule_count_matches_mode(target in 0.0f64..1_000.0) {
        for mode in [
            Mode::Active { target },
            Mode::Mineral { target },
            Mode::Limit3 { target },
            Mode::Limit2 { target },
        ] {
            let expected = mode.rule_count();
            let spec = ParamSpec {
                parametertype_id: 1,
                unit: None,
                mode,
            };
            prop_assert_eq!(build_rules(&spec, 1).unwrap().len(), expected);
        }
    }
}
