//! The `Rule` record — one row of a generated rule set.

use serde::{Deserialize, Serialize};

use crate::enums::{DdfType, Linker, Operator, RuleColor};
use crate::value::RuleValue;

/// One threshold/comparison entry of a rule set.
///
/// Field order matches the historical wire layout; every field is always
/// present on the wire (null rather than omitted). `column`, `inverse`, and
/// `show` are fixed to 0/0/1 in generated rules but stay plain integers so
/// foreign documents pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub color: Option<RuleColor>,
    pub column: Option<i64>,
    #[serde(rename = "DDF_target_value", default)]
    pub ddf_target_value: RuleValue,
    #[serde(rename = "DDF_type")]
    pub ddf_type: Option<DdfType>,
    #[serde(rename = "DDF_unit")]
    pub ddf_unit: Option<String>,
    pub inverse: Option<i64>,
    pub linker: Option<Linker>,
    pub operator: Option<Operator>,
    pub operator2: Option<Operator>,
    pub parametertype_id: Option<i64>,
    pub regex_filter: Option<String>,
    pub show: Option<i64>,
    pub spec_id: Option<i64>,
    pub text: Option<String>,
    pub translations: Option<String>,
    #[serde(default)]
    pub value: RuleValue,
    #[serde(default)]
    pub value2: RuleValue,
}

impl Rule {
    /// A rule skeleton with the fixed constants set and everything else null.
    pub fn new(parametertype_id: i64, spec_id: i64) -> Self {
        Rule {
            color: None,
            column: Some(0),
            ddf_target_value: RuleValue::Null,
            ddf_type: None,
            ddf_unit: None,
            inverse: Some(0),
            linker: None,
            operator: None,
            operator2: None,
            parametertype_id: Some(parametertype_id),
            regex_filter: None,
            show: Some(1),
            spec_id: Some(spec_id),
            text: None,
            translations: None,
            value: RuleValue::Null,
            value2: RuleValue::Null,
        }
    }

    /// Sets the classification and its paired color.
    pub fn classify(mut self, ddf_type: DdfType) -> Self {
        self.color = Some(ddf_type.color());
        self.ddf_type = Some(ddf_type);
        self
    }
}
