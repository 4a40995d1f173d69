//! Integration tests for rule generation.

use std::collections::BTreeMap;

use lims_engine::{
    EngineError, GenerationWarning, Mode, NutritionInput, ParamSpec, build_nutrition_rules,
    build_rules,
};
use lims_model::{DdfType, Linker, Operator, RuleValue};

fn spec(parametertype_id: i64, unit: Option<&str>, mode: Mode) -> ParamSpec {
    ParamSpec {
        parametertype_id,
        unit: unit.map(str::to_string),
        mode,
    }
}

#[test]
fn test_active_target_12_boundaries() {
    let rules = build_rules(&spec(5587, Some("mg"), Mode::Active { target: 12.0 }), 1029).unwrap();
    assert_eq!(rules.len(), 4);

    let perfect = &rules[0].data;
    assert_eq!(perfect.ddf_type, Some(DdfType::Perfect));
    assert_eq!(perfect.operator, Some(Operator::Ge));
    assert_eq!(perfect.value, RuleValue::Float(10.8));
    assert_eq!(perfect.linker, Some(Linker::And));
    assert_eq!(perfect.operator2, Some(Operator::Le));
    assert_eq!(perfect.value2, RuleValue::Float(15.0));
    assert_eq!(perfect.ddf_target_value, RuleValue::Float(12.0));
    assert_eq!(perfect.ddf_unit.as_deref(), Some("mg"));

    let ok_low = &rules[1].data;
    assert_eq!(ok_low.ddf_type, Some(DdfType::Ok));
    assert_eq!(ok_low.value, RuleValue::Float(9.6));
    assert_eq!(ok_low.operator2, Some(Operator::Lt));
    assert_eq!(ok_low.value2, RuleValue::Float(10.8));

    let ok_high = &rules[2].data;
    assert_eq!(ok_high.operator, Some(Operator::Gt));
    assert_eq!(ok_high.value, RuleValue::Float(15.0));
    assert_eq!(ok_high.value2, RuleValue::Float(18.0));

    let not_ok = &rules[3].data;
    assert_eq!(not_ok.ddf_type, Some(DdfType::NotOk));
    assert_eq!(not_ok.operator, Some(Operator::Lt));
    assert_eq!(not_ok.value, RuleValue::Float(9.6));
    assert_eq!(not_ok.linker, Some(Linker::Or));
    assert_eq!(not_ok.operator2, Some(Operator::Gt));
    assert_eq!(not_ok.value2, RuleValue::Float(18.0));
}

#[test]
fn test_active_zero_target_degenerates_to_pair() {
    let rules = build_rules(&spec(100, None, Mode::Active { target: 0.0 }), 1).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].data.ddf_type, Some(DdfType::Perfect));
    assert_eq!(rules[0].data.operator, Some(Operator::Le));
    assert_eq!(rules[0].data.value, RuleValue::Float(0.0));
    assert_eq!(rules[1].data.ddf_type, Some(DdfType::NotOk));
    assert_eq!(rules[1].data.operator, Some(Operator::Gt));
    assert_eq!(rules[1].data.value, RuleValue::Float(0.0));
}

#[test]
fn test_mineral_upper_ok_ceiling() {
    let rules = build_rules(&spec(7, None, Mode::Mineral { target: 20.0 }), 1).unwrap();
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[2].data.value2, RuleValue::Float(29.0));
    assert_eq!(rules[3].data.value2, RuleValue::Float(29.0));
}

#[test]
fn test_limit3_rules() {
    let rules = build_rules(&spec(7, Some("%"), Mode::Limit3 { target: 10.0 }), 3).unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].data.operator, Some(Operator::Le));
    assert_eq!(rules[0].data.value, RuleValue::Float(3.0));
    assert_eq!(rules[1].data.ddf_type, Some(DdfType::Ok));
    assert_eq!(rules[1].data.value, RuleValue::Float(3.0));
    assert_eq!(rules[1].data.value2, RuleValue::Float(10.0));
    assert_eq!(rules[2].data.operator, Some(Operator::Gt));
    assert_eq!(rules[2].data.value, RuleValue::Float(10.0));

    let at_zero = build_rules(&spec(7, Some("%"), Mode::Limit3 { target: 0.0 }), 3).unwrap();
    assert_eq!(at_zero.len(), 2);
}

#[test]
fn test_limit2_rules() {
    let rules = build_rules(&spec(9, None, Mode::Limit2 { target: 0.0 }), 3).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].data.operator, Some(Operator::Le));
    assert_eq!(rules[1].data.operator, Some(Operator::Gt));
    assert_eq!(rules[0].data.value, rules[1].data.value);
}

#[test]
fn test_qualitative_rules() {
    let mode = Mode::from_parts("qualitative", Some(0.1), Some(("negative", "negativ"))).unwrap();
    let rules = build_rules(&spec(11, None, mode), 3).unwrap();
    assert_eq!(rules.len(), 2);

    let perfect = &rules[0].data;
    assert_eq!(perfect.operator, Some(Operator::Eq));
    assert_eq!(perfect.value, RuleValue::Text("negative".to_string()));
    assert_eq!(perfect.linker, Some(Linker::Or));
    assert_eq!(perfect.operator2, Some(Operator::Eq));
    assert_eq!(perfect.value2, RuleValue::Text("negativ".to_string()));

    assert_eq!(rules[1].data.operator, Some(Operator::Gt));
    assert_eq!(rules[1].data.value, RuleValue::Float(0.1));
}

#[test]
fn test_dummy_rule_sentinel_on_the_wire() {
    let rules = build_rules(&spec(5587, Some("mg"), Mode::Dummy), 1029).unwrap();
    assert_eq!(rules.len(), 1);
    let rule = &rules[0].data;
    assert_eq!(rule.operator, Some(Operator::Ne));
    assert!(rule.value.is_dummy());
    // Dummy ignores target and unit even when supplied.
    assert!(rule.ddf_target_value.is_null());
    assert_eq!(rule.ddf_unit, None);

    let wire = serde_json::to_value(rule).unwrap();
    assert_eq!(wire["value"], serde_json::Value::String("\"\"".to_string()));
}

#[test]
fn test_validation_errors() {
    assert_eq!(
        build_rules(&spec(0, None, Mode::Dummy), 1).unwrap_err(),
        EngineError::NonPositiveParameterId(0)
    );
    assert!(matches!(
        Mode::from_parts("active", None, None).unwrap_err(),
        EngineError::MissingTarget { .. }
    ));
    assert_eq!(
        Mode::from_parts("active", Some(-1.0), None).unwrap_err(),
        EngineError::NegativeTarget(-1.0)
    );
    assert_eq!(
        Mode::from_parts("qualitative", Some(1.0), Some(("", "negativ"))).unwrap_err(),
        EngineError::MissingQualitativeText
    );
    assert_eq!(
        Mode::from_parts("bogus", Some(1.0), None).unwrap_err(),
        EngineError::UnknownMode("bogus".to_string())
    );
}

#[test]
fn test_mode_rule_counts() {
    assert_eq!(Mode::Active { target: 12.0 }.rule_count(), 4);
    assert_eq!(Mode::Active { target: 0.0 }.rule_count(), 2);
    assert_eq!(Mode::Limit3 { target: 5.0 }.rule_count(), 3);
    assert_eq!(Mode::Limit2 { target: 5.0 }.rule_count(), 2);
    assert_eq!(Mode::Dummy.rule_count(), 1);
}

#[test]
fn test_nutrition_full_table_with_one_target() {
    let mut inputs = BTreeMap::new();
    inputs.insert(
        5239,
        NutritionInput {
            target: Some(20.0),
            ..NutritionInput::default()
        },
    );
    let (rules, warnings) = build_nutrition_rules(1256, &inputs).unwrap();

    // 21 dummy rules + perfect/not-OK pair for fat.
    assert_eq!(rules.len(), 23);
    assert!(warnings.is_empty());

    let fat: Vec<_> = rules
        .iter()
        .filter(|r| r.data.parametertype_id == Some(5239))
        .collect();
    assert_eq!(fat.len(), 2);
    // 20 is inside the 10..=40 piecewise window: ±20% → [16, 24].
    assert_eq!(fat[0].data.value, RuleValue::Float(16.0));
    assert_eq!(fat[0].data.value2, RuleValue::Float(24.0));
    assert_eq!(fat[0].data.ddf_unit.as_deref(), Some("g/100g"));
    assert_eq!(fat[1].data.operator, Some(Operator::Lt));
    assert_eq!(fat[1].data.linker, Some(Linker::Or));

    let dummy = rules
        .iter()
        .find(|r| r.data.parametertype_id == Some(5246))
        .unwrap();
    assert!(dummy.data.value.is_dummy());
}

#[test]
fn test_nutrition_deviation_defaulted_warning() {
    let mut inputs = BTreeMap::new();
    inputs.insert(
        5247,
        NutritionInput {
            target: Some(8.0),
            ..NutritionInput::default()
        },
    );
    let (rules, warnings) = build_nutrition_rules(9, &inputs).unwrap();
    assert!(matches!(
        warnings.as_slice(),
        [GenerationWarning::DeviationDefaulted {
            parametertype_id: 5247,
            ..
        }]
    ));
    let fructose = rules
        .iter()
        .find(|r| {
            r.data.parametertype_id == Some(5247) && r.data.ddf_type == Some(DdfType::Perfect)
        })
        .unwrap();
    // 10% default: 8 ± 0.8.
    assert_eq!(fructose.data.value, RuleValue::Float(7.2));
    assert_eq!(fructose.data.value2, RuleValue::Float(8.8));
}

#[test]
fn test_nutrition_lower_bound_clamped() {
    let mut inputs = BTreeMap::new();
    // Fat below the low threshold: absolute deviation 1.5 > target 1.0.
    inputs.insert(
        5239,
        NutritionInput {
            target: Some(1.0),
            ..NutritionInput::default()
        },
    );
    let (rules, warnings) = build_nutrition_rules(9, &inputs).unwrap();
    assert!(matches!(
        warnings.as_slice(),
        [GenerationWarning::LowerBoundClamped {
            parametertype_id: 5239,
            ..
        }]
    ));
    let perfect = rules
        .iter()
        .find(|r| {
            r.data.parametertype_id == Some(5239) && r.data.ddf_type == Some(DdfType::Perfect)
        })
        .unwrap();
    assert_eq!(perfect.data.value, RuleValue::Float(0.0));
    assert_eq!(perfect.data.value2, RuleValue::Float(2.5));
}

#[test]
fn test_nutrition_sodium_unit_fallback() {
    let mut inputs = BTreeMap::new();
    inputs.insert(
        5299,
        NutritionInput {
            target: Some(100.0),
            unit: Some("mg".to_string()),
            deviation_percent: Some(15.0),
        },
    );
    let (rules, warnings) = build_nutrition_rules(9, &inputs).unwrap();
    assert!(warnings.is_empty());
    let sodium = rules
        .iter()
        .find(|r| {
            r.data.parametertype_id == Some(5299) && r.data.ddf_type == Some(DdfType::Perfect)
        })
        .unwrap();
    // Non-locked unit → percent policy: 100 ± 15.
    assert_eq!(sodium.data.value, RuleValue::Float(85.0));
    assert_eq!(sodium.data.value2, RuleValue::Float(115.0));
}

#[test]
fn test_nutrition_input_validation() {
    let mut inputs = BTreeMap::new();
    inputs.insert(1, NutritionInput::default());
    assert_eq!(
        build_nutrition_rules(9, &inputs).unwrap_err(),
        EngineError::UnknownNutritionParameter(1)
    );

    let mut inputs = BTreeMap::new();
    inputs.insert(
        5247,
        NutritionInput {
            target: Some(8.0),
            deviation_percent: Some(60.0),
            ..NutritionInput::default()
        },
    );
    assert_eq!(
        build_nutrition_rules(9, &inputs).unwrap_err(),
        EngineError::DeviationOutOfRange(60.0)
    );
}
