//! Rule construction: mode dispatch, band math, ordered rule records.

use std::collections::BTreeMap;
use std::fmt;

use lims_model::{DdfType, Entry, Linker, Operator, Rule, RuleValue};

use crate::bands::{ActiveBands, active_bands, limit3_threshold, mineral_bands};
use crate::deviation::{
    DEFAULT_DEVIATION_PERCENT, DEVIATION_PERCENT_MAX, DeviationPolicy, compute_bounds,
    deviation_for,
};
use crate::error::{EngineError, Result};
use crate::families::{
    FamilyGroup, LOCKED_UNIT, NUTRITION_PARAMETERS, nutrition_parameter, select_policy,
};
use crate::numeric::{quantize2, quantize4};

/// Banding mode of one parameter, carrying exactly the data it needs.
///
/// `Qualitative` always has its two match texts; `Dummy` carries neither
/// target nor unit. That keeps "mode requires X" checks out of the builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// 4-band active target (perfect, OK low, OK high, not OK).
    Active { target: f64 },
    /// Same as active, but the upper OK band ends at 1.45 × target.
    Mineral { target: f64 },
    /// 3-band limit: perfect ≤ 0.30 × target, OK up to target, not OK above.
    Limit3 { target: f64 },
    /// 2-band limit: perfect ≤ target, not OK above.
    Limit2 { target: f64 },
    /// Perfect on exact string match (EN or DE), not OK above the target.
    Qualitative {
        target: f64,
        match_en: String,
        match_de: String,
    },
    /// Always-perfect unless the literal `""` sentinel is reported.
    Dummy,
}

impl Mode {
    /// The mode name as written in CLI/tabular input.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Active { .. } => "active",
            Mode::Mineral { .. } => "mineral",
            Mode::Limit3 { .. } => "limit3",
            Mode::Limit2 { .. } => "limit2",
            Mode::Qualitative { .. } => "qualitative",
            Mode::Dummy => "dummy",
        }
    }

    /// Builds a mode from loose textual parts, validating requirements.
    ///
    /// `qual` supplies the (EN, DE) match texts; it is required non-empty
    /// exactly when `name` is `qualitative`.
    pub fn from_parts(name: &str, target: Option<f64>, qual: Option<(&str, &str)>) -> Result<Mode> {
        let normalized = name.trim().to_lowercase();
        let require_target = |mode: &'static str| -> Result<f64> {
            let target = target.ok_or(EngineError::MissingTarget { mode })?;
            if target < 0.0 {
                return Err(EngineError::NegativeTarget(target));
            }
            Ok(target)
        };
        match normalized.as_str() {
            "active" => Ok(Mode::Active {
                target: require_target("Active")?,
            }),
            "mineral" => Ok(Mode::Mineral {
                target: require_target("Mineral")?,
            }),
            "limit3" => Ok(Mode::Limit3 {
                target: require_target("Limit3")?,
            }),
            "limit2" => Ok(Mode::Limit2 {
                target: require_target("Limit2")?,
            }),
            "qualitative" => {
                let target = require_target("Qualitative")?;
                let (match_en, match_de) = match qual {
                    Some((en, de)) if !en.trim().is_empty() && !de.trim().is_empty() => (en, de),
                    _ => return Err(EngineError::MissingQualitativeText),
                };
                Ok(Mode::Qualitative {
                    target,
                    match_en: match_en.to_string(),
                    match_de: match_de.to_string(),
                })
            }
            "dummy" => Ok(Mode::Dummy),
            _ => Err(EngineError::UnknownMode(name.trim().to_string())),
        }
    }

    /// Number of rules this mode generates.
    pub fn rule_count(&self) -> usize {
        match self {
            Mode::Active { target } | Mode::Mineral { target } => {
                if *target == 0.0 { 2 } else { 4 }
            }
            Mode::Limit3 { target } => {
                if *target == 0.0 { 2 } else { 3 }
            }
            Mode::Limit2 { .. } | Mode::Qualitative { .. } => 2,
            Mode::Dummy => 1,
        }
    }
}

/// One parameter to generate rules for.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub parametertype_id: i64,
    pub unit: Option<String>,
    pub mode: Mode,
}

/// Non-fatal corrections applied while generating rules.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationWarning {
    /// Percent-deviation parameter had no deviation%; 10% was assumed.
    DeviationDefaulted {
        parametertype_id: i64,
        name: &'static str,
    },
    /// Computed lower bound was negative and clamped to 0.
    LowerBoundClamped {
        parametertype_id: i64,
        name: &'static str,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::DeviationDefaulted {
                parametertype_id,
                name,
            } => write!(
                f,
                "{name} ({parametertype_id}): deviation% not provided. Defaulted to {DEFAULT_DEVIATION_PERCENT}%."
            ),
            GenerationWarning::LowerBoundClamped {
                parametertype_id,
                name,
            } => write!(
                f,
                "{name} ({parametertype_id}): lower bound was negative and was clamped to 0."
            ),
        }
    }
}

struct RuleParts<'a> {
    parametertype_id: i64,
    spec_id: i64,
    target: Option<f64>,
    unit: Option<&'a str>,
}

impl RuleParts<'_> {
    fn base(&self, ddf_type: DdfType) -> Rule {
        let mut rule = Rule::new(self.parametertype_id, self.spec_id).classify(ddf_type);
        rule.ddf_target_value = match self.target {
            Some(target) => RuleValue::Float(target),
            None => RuleValue::Null,
        };
        rule.ddf_unit = self.unit.map(str::to_string);
        rule
    }

    fn single(&self, ddf_type: DdfType, operator: Operator, value: RuleValue) -> Entry<Rule> {
        let mut rule = self.base(ddf_type);
        rule.operator = Some(operator);
        rule.value = value;
        Entry::create(rule)
    }

    fn linked(
        &self,
        ddf_type: DdfType,
        operator: Operator,
        value: RuleValue,
        linker: Linker,
        operator2: Operator,
        value2: RuleValue,
    ) -> Entry<Rule> {
        let mut rule = self.base(ddf_type);
        rule.operator = Some(operator);
        rule.value = value;
        rule.linker = Some(linker);
        rule.operator2 = Some(operator2);
        rule.value2 = value2;
        Entry::create(rule)
    }
}

/// Degenerate pair for a zero target: perfect `<= 0`, not OK `> 0`.
fn zero_target_pair(parts: &RuleParts<'_>) -> Vec<Entry<Rule>> {
    vec![
        parts.single(DdfType::Perfect, Operator::Le, RuleValue::Float(0.0)),
        parts.single(DdfType::NotOk, Operator::Gt, RuleValue::Float(0.0)),
    ]
}

/// Four rules over active/mineral bands: perfect, OK low, OK high, not OK.
fn four_band_rules(parts: &RuleParts<'_>, bands: ActiveBands) -> Vec<Entry<Rule>> {
    vec![
        parts.linked(
            DdfType::Perfect,
            Operator::Ge,
            RuleValue::Float(bands.low_perfect),
            Linker::And,
            Operator::Le,
            RuleValue::Float(bands.high_perfect),
        ),
        parts.linked(
            DdfType::Ok,
            Operator::Ge,
            RuleValue::Float(bands.low_ok),
            Linker::And,
            Operator::Lt,
            RuleValue::Float(bands.low_perfect),
        ),
        parts.linked(
            DdfType::Ok,
            Operator::Gt,
            RuleValue::Float(bands.high_perfect),
            Linker::And,
            Operator::Le,
            RuleValue::Float(bands.high_ok2),
        ),
        parts.linked(
            DdfType::NotOk,
            Operator::Lt,
            RuleValue::Float(bands.low_ok),
            Linker::Or,
            Operator::Gt,
            RuleValue::Float(bands.high_ok2),
        ),
    ]
}

/// Generates the ordered rule records for one parameter.
///
/// Rules come out perfect-first, not-OK-last; OK bands sit in between.
pub fn build_rules(spec: &ParamSpec, spec_id: i64) -> Result<Vec<Entry<Rule>>> {
    if spec.parametertype_id <= 0 {
        return Err(EngineError::NonPositiveParameterId(spec.parametertype_id));
    }
    let unit = spec.unit.as_deref();

    let rules = match &spec.mode {
        Mode::Active { target } => {
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: Some(*target),
                unit,
            };
            if *target == 0.0 {
                zero_target_pair(&parts)
            } else {
                four_band_rules(&parts, active_bands(*target))
            }
        }
        Mode::Mineral { target } => {
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: Some(*target),
                unit,
            };
            if *target == 0.0 {
                zero_target_pair(&parts)
            } else {
                four_band_rules(&parts, mineral_bands(*target))
            }
        }
        Mode::Limit3 { target } => {
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: Some(*target),
                unit,
            };
            if *target == 0.0 {
                zero_target_pair(&parts)
            } else {
                let threshold = limit3_threshold(*target);
                let ceiling = quantize2(*target);
                vec![
                    parts.single(DdfType::Perfect, Operator::Le, RuleValue::Float(threshold)),
                    parts.linked(
                        DdfType::Ok,
                        Operator::Ge,
                        RuleValue::Float(threshold),
                        Linker::And,
                        Operator::Le,
                        RuleValue::Float(ceiling),
                    ),
                    parts.single(DdfType::NotOk, Operator::Gt, RuleValue::Float(ceiling)),
                ]
            }
        }
        Mode::Limit2 { target } => {
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: Some(*target),
                unit,
            };
            let ceiling = quantize2(*target);
            vec![
                parts.single(DdfType::Perfect, Operator::Le, RuleValue::Float(ceiling)),
                parts.single(DdfType::NotOk, Operator::Gt, RuleValue::Float(ceiling)),
            ]
        }
        Mode::Qualitative {
            target,
            match_en,
            match_de,
        } => {
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: Some(*target),
                unit,
            };
            vec![
                parts.linked(
                    DdfType::Perfect,
                    Operator::Eq,
                    RuleValue::Text(match_en.clone()),
                    Linker::Or,
                    Operator::Eq,
                    RuleValue::Text(match_de.clone()),
                ),
                parts.single(
                    DdfType::NotOk,
                    Operator::Gt,
                    RuleValue::Float(quantize2(*target)),
                ),
            ]
        }
        Mode::Dummy => {
            // Dummy ignores target and unit entirely.
            let parts = RuleParts {
                parametertype_id: spec.parametertype_id,
                spec_id,
                target: None,
                unit: None,
            };
            vec![parts.single(DdfType::Perfect, Operator::Ne, RuleValue::dummy())]
        }
    };

    Ok(rules)
}

/// Per-parameter input for the nutrition generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionInput {
    /// Target value; `None` generates a single dummy-sentinel rule.
    pub target: Option<f64>,
    pub unit: Option<String>,
    /// User-supplied deviation percentage, for percent-policy parameters.
    pub deviation_percent: Option<f64>,
}

/// Generates deviation-band rules for the full nutrition parameter table.
///
/// Every table parameter produces output, in table order: parameters
/// without a target get a dummy-sentinel rule, the rest get a perfect
/// `[lower, upper]` band plus the complementary not-OK rule.
pub fn build_nutrition_rules(
    spec_id: i64,
    inputs: &BTreeMap<i64, NutritionInput>,
) -> Result<(Vec<Entry<Rule>>, Vec<GenerationWarning>)> {
    for (&id, input) in inputs {
        if nutrition_parameter(id).is_none() {
            return Err(EngineError::UnknownNutritionParameter(id));
        }
        if let Some(target) = input.target
            && target < 0.0
        {
            return Err(EngineError::NegativeTarget(target));
        }
        if let Some(percent) = input.deviation_percent
            && !(0.0..=DEVIATION_PERCENT_MAX).contains(&percent)
        {
            return Err(EngineError::DeviationOutOfRange(percent));
        }
    }

    let mut rules = Vec::new();
    let mut warnings = Vec::new();

    for param in NUTRITION_PARAMETERS {
        let input = inputs.get(&param.parametertype_id);
        let unit = match param.group {
            FamilyGroup::Locked => Some(LOCKED_UNIT.to_string()),
            _ => input
                .and_then(|i| i.unit.as_deref())
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        };

        let Some(target) = input.and_then(|i| i.target) else {
            let parts = RuleParts {
                parametertype_id: param.parametertype_id,
                spec_id,
                target: None,
                unit: unit.as_deref(),
            };
            rules.push(parts.single(DdfType::Perfect, Operator::Ne, RuleValue::dummy()));
            continue;
        };

        let policy = select_policy(param, unit.as_deref());
        let percent = if policy == DeviationPolicy::Percent {
            match input.and_then(|i| i.deviation_percent) {
                Some(percent) => percent,
                None => {
                    warnings.push(GenerationWarning::DeviationDefaulted {
                        parametertype_id: param.parametertype_id,
                        name: param.name,
                    });
                    DEFAULT_DEVIATION_PERCENT
                }
            }
        } else {
            0.0
        };

        let deviation = deviation_for(policy, target, percent);
        let bounds = compute_bounds(target, deviation);
        if bounds.clamped {
            warnings.push(GenerationWarning::LowerBoundClamped {
                parametertype_id: param.parametertype_id,
                name: param.name,
            });
        }

        let parts = RuleParts {
            parametertype_id: param.parametertype_id,
            spec_id,
            target: Some(quantize4(target)),
            unit: unit.as_deref(),
        };
        rules.push(parts.linked(
            DdfType::Perfect,
            Operator::Ge,
            RuleValue::Float(bounds.lower),
            Linker::And,
            Operator::Le,
            RuleValue::Float(bounds.upper),
        ));
        rules.push(parts.linked(
            DdfType::NotOk,
            Operator::Lt,
            RuleValue::Float(bounds.lower),
            Linker::Or,
            Operator::Gt,
            RuleValue::Float(bounds.upper),
        ));
    }

    Ok((rules, warnings))
}
