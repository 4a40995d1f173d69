//! Type-safe enumerations for the rule wire format.
//!
//! The downstream LIMS treats these as fixed string literals; the enums
//! here carry the exact wire spelling (`"not OK"`, `"<="`, `"AND"`, ...)
//! so generated payloads cannot drift from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rating classification of one rule.
///
/// Each classification maps 1:1 to a display color in the LIMS UI:
/// perfect → green, OK → orange, not OK → red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DdfType {
    /// Value is inside the target band.
    #[serde(rename = "perfect")]
    Perfect,

    /// Value is inside a tolerance band around the target band.
    #[serde(rename = "OK")]
    Ok,

    /// Value is outside every tolerance band.
    #[serde(rename = "not OK")]
    NotOk,
}

impl DdfType {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DdfType::Perfect => "perfect",
            DdfType::Ok => "OK",
            DdfType::NotOk => "not OK",
        }
    }

    /// Returns the display color the LIMS pairs with this classification.
    pub fn color(&self) -> RuleColor {
        match self {
            DdfType::Perfect => RuleColor::Green,
            DdfType::Ok => RuleColor::Orange,
            DdfType::NotOk => RuleColor::Red,
        }
    }
}

impl fmt::Display for DdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DdfType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "perfect" => Ok(DdfType::Perfect),
            "OK" => Ok(DdfType::Ok),
            "not OK" => Ok(DdfType::NotOk),
            _ => Err(format!("Unknown DDF_type: {s}")),
        }
    }
}

/// Display color of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleColor {
    Green,
    Orange,
    Red,
}

impl RuleColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleColor::Green => "green",
            RuleColor::Orange => "orange",
            RuleColor::Red => "red",
        }
    }
}

impl fmt::Display for RuleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "green" => Ok(RuleColor::Green),
            "orange" => Ok(RuleColor::Orange),
            "red" => Ok(RuleColor::Red),
            _ => Err(format!("Unknown color: {s}")),
        }
    }
}

/// Comparison operator of one rule clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Le => "<=",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Eq => "=",
            Operator::Ne => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" => Ok(Operator::Le),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Ge),
            ">" => Ok(Operator::Gt),
            "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            _ => Err(format!("Unknown operator: {s}")),
        }
    }
}

/// Boolean combinator joining a rule's two comparison clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Linker {
    And,
    Or,
}

impl Linker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linker::And => "AND",
            Linker::Or => "OR",
        }
    }
}

impl fmt::Display for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Linker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Linker::And),
            "OR" => Ok(Linker::Or),
            _ => Err(format!("Unknown linker: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddf_type_wire_spelling() {
        assert_eq!(DdfType::NotOk.as_str(), "not OK");
        assert_eq!("not OK".parse::<DdfType>().unwrap(), DdfType::NotOk);
        assert_eq!(
            serde_json::to_string(&DdfType::NotOk).unwrap(),
            "\"not OK\""
        );
    }

    #[test]
    fn test_color_pairing() {
        assert_eq!(DdfType::Perfect.color(), RuleColor::Green);
        assert_eq!(DdfType::Ok.color(), RuleColor::Orange);
        assert_eq!(DdfType::NotOk.color(), RuleColor::Red);
    }

    #[test]
    fn test_operator_round_trip() {
        for op in [
            Operator::Le,
            Operator::Lt,
            Operator::Ge,
            Operator::Gt,
            Operator::Eq,
            Operator::Ne,
        ] {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_linker_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Linker::And).unwrap(), "\"AND\"");
        assert_eq!("or".parse::<Linker>().unwrap(), Linker::Or);
    }
}
