//! Nutrition parameter families and their deviation policies.
//!
//! Immutable lookup data: parametertype_id → family grouping + the policy
//! its deviation is derived with. The numeric policy machinery lives in
//! [`crate::deviation`]; nothing here branches on ids at computation time.

use crate::deviation::DeviationPolicy;

/// Unit the nine main nutrition parameters are locked to.
pub const LOCKED_UNIT: &str = "g/100g";

/// Grouping that decides how a parameter's policy is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyGroup {
    /// Main label parameters; unit forced to `g/100g`, fixed policy.
    Locked,
    /// Sodium and mono/poly fatty acids: fixed policy only when the unit is
    /// `g/100g`, otherwise user-supplied percent deviation.
    SodiumLike,
    /// Everything else: percent deviation.
    Other,
}

/// One row of the nutrition parameter table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionParameter {
    pub parametertype_id: i64,
    pub name: &'static str,
    pub group: FamilyGroup,
    /// Policy applied when the unit is the locked one (always, for the
    /// locked group). `Percent` for the "other" group.
    pub locked_policy: DeviationPolicy,
}

const ENERGY: DeviationPolicy = DeviationPolicy::Energy;
const MACRO_WIDE: DeviationPolicy = DeviationPolicy::Piecewise {
    low_threshold: 10.0,
    high_threshold: 40.0,
    low_abs: 2.0,
    high_abs: 8.0,
};
const FAT_TOTAL: DeviationPolicy = DeviationPolicy::Piecewise {
    low_threshold: 10.0,
    high_threshold: 40.0,
    low_abs: 1.5,
    high_abs: 8.0,
};
const SATURATED_FAT: DeviationPolicy = DeviationPolicy::ThresholdFloor {
    threshold: 4.0,
    low_abs: 0.8,
};
const SALT: DeviationPolicy = DeviationPolicy::ThresholdFloor {
    threshold: 1.25,
    low_abs: 0.375,
};
const SODIUM: DeviationPolicy = DeviationPolicy::ThresholdFloor {
    threshold: 0.5,
    low_abs: 0.15,
};
const PERCENT: DeviationPolicy = DeviationPolicy::Percent;

/// The fixed nutrition parameter table, in display order.
pub const NUTRITION_PARAMETERS: &[NutritionParameter] = &[
    NutritionParameter {
        parametertype_id: 11709,
        name: "Energy value in kJ (protein = N x 6.25)",
        group: FamilyGroup::Locked,
        locked_policy: ENERGY,
    },
    NutritionParameter {
        parametertype_id: 11710,
        name: "Energy value in kcal (protein = N x 6.25)",
        group: FamilyGroup::Locked,
        locked_policy: ENERGY,
    },
    NutritionParameter {
        parametertype_id: 5239,
        name: "Fat, Total",
        group: FamilyGroup::Locked,
        locked_policy: FAT_TOTAL,
    },
    NutritionParameter {
        parametertype_id: 5444,
        name: "Fatty acid, saturated",
        group: FamilyGroup::Locked,
        locked_policy: SATURATED_FAT,
    },
    NutritionParameter {
        parametertype_id: 5244,
        name: "Carbohydrates*",
        group: FamilyGroup::Locked,
        locked_policy: MACRO_WIDE,
    },
    NutritionParameter {
        parametertype_id: 5245,
        name: "Sugar",
        group: FamilyGroup::Locked,
        locked_policy: MACRO_WIDE,
    },
    NutritionParameter {
        parametertype_id: 5252,
        name: "Fibre",
        group: FamilyGroup::Locked,
        locked_policy: MACRO_WIDE,
    },
    NutritionParameter {
        parametertype_id: 11423,
        name: "Protein, N x 6.25",
        group: FamilyGroup::Locked,
        locked_policy: MACRO_WIDE,
    },
    NutritionParameter {
        parametertype_id: 11440,
        name: "Salt from sodium",
        group: FamilyGroup::Locked,
        locked_policy: SALT,
    },
    NutritionParameter {
        parametertype_id: 5240,
        name: "Fatty acid*",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5246,
        name: "Sugar, total",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5247,
        name: "Fructose",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5248,
        name: "Glucose",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5249,
        name: "Sucrose",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5250,
        name: "Maltose",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5251,
        name: "Lactose",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 5445,
        name: "Fatty acid, monounsaturated",
        group: FamilyGroup::SodiumLike,
        locked_policy: SATURATED_FAT,
    },
    NutritionParameter {
        parametertype_id: 5446,
        name: "Fatty acid, polyunsaturated",
        group: FamilyGroup::SodiumLike,
        locked_policy: SATURATED_FAT,
    },
    NutritionParameter {
        parametertype_id: 5299,
        name: "Sodium_10873",
        group: FamilyGroup::SodiumLike,
        locked_policy: SODIUM,
    },
    NutritionParameter {
        parametertype_id: 11249,
        name: "Ash",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 11377,
        name: "Air humidity",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
    NutritionParameter {
        parametertype_id: 12016,
        name: "moisture",
        group: FamilyGroup::Other,
        locked_policy: PERCENT,
    },
];

/// Looks up a nutrition parameter by id.
pub fn nutrition_parameter(parametertype_id: i64) -> Option<&'static NutritionParameter> {
    NUTRITION_PARAMETERS
        .iter()
        .find(|p| p.parametertype_id == parametertype_id)
}

/// Selects the effective policy for a parameter given the entered unit.
pub fn select_policy(param: &NutritionParameter, unit: Option<&str>) -> DeviationPolicy {
    match param.group {
        FamilyGroup::Locked => param.locked_policy,
        FamilyGroup::SodiumLike => {
            if unit.map(str::trim) == Some(LOCKED_UNIT) {
                param.locked_policy
            } else {
                DeviationPolicy::Percent
            }
        }
        FamilyGroup::Other => DeviationPolicy::Percent,
    }
}
