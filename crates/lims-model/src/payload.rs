//! Aggregate payload containers and wire JSON emission.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::rule::Rule;

/// An action-wrapped payload item: `{ "action": ..., "data": ... }`.
///
/// The action tag is always `"create"` in generated payloads, but it is an
/// opaque passthrough string — mutation tools may overwrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub action: String,
    pub data: T,
}

impl<T> Entry<T> {
    pub fn create(data: T) -> Self {
        Entry {
            action: "create".to_string(),
            data,
        }
    }
}

/// The rules wire document: `{ "rules": [ ... ] }`, order preserved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RulesPayload {
    pub rules: Vec<Entry<Rule>>,
}

impl RulesPayload {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One laboratory specification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub spec_type: Option<i64>,
    pub status: Option<i64>,
    pub archiviert: Option<i64>,
    pub order: Option<String>,
    /// JSON-encoded *string* (double-encoded), as the LIMS import expects.
    pub translations: Option<String>,
}

impl SpecRecord {
    /// Builds the double-encoded translations string for a spec name.
    pub fn default_translations(name: &str) -> String {
        let inner = serde_json::json!({
            "en": {
                "name": name,
                "DDF_Defaulttext_OK": "NULL",
                "DDF_Defaulttext_NOT_OK": "NULL",
                "DDF_Defaulttext_Toleranzbereich_NOT_OK": "NULL",
            }
        });
        inner.to_string()
    }
}

/// The specs wire document: `{ "specs": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecsPayload {
    pub specs: Vec<Entry<SpecRecord>>,
}

/// Serializes a payload the way the wire expects: pretty-printed with
/// 2-space indentation, UTF-8, trailing newline.
pub fn to_wire_json<T: Serialize>(payload: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(payload)?;
    out.push('\n');
    Ok(out)
}

/// Parses a wire document.
pub fn from_wire_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{DdfType, Linker, Operator};
    use crate::value::RuleValue;

    fn sample_payload() -> RulesPayload {
        let mut perfect = Rule::new(5239, 1256).classify(DdfType::Perfect);
        perfect.operator = Some(Operator::Ge);
        perfect.operator2 = Some(Operator::Le);
        perfect.linker = Some(Linker::And);
        perfect.value = RuleValue::Float(10.8);
        perfect.value2 = RuleValue::Float(15.0);
        perfect.ddf_target_value = RuleValue::Float(12.0);
        perfect.ddf_unit = Some("mg".to_string());

        let mut not_ok = Rule::new(5239, 1256).classify(DdfType::NotOk);
        not_ok.operator = Some(Operator::Gt);
        not_ok.value = RuleValue::Float(18.0);
        not_ok.ddf_target_value = RuleValue::Float(12.0);
        not_ok.ddf_unit = Some("mg".to_string());

        RulesPayload {
            rules: vec![Entry::create(perfect), Entry::create(not_ok)],
        }
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let payload = sample_payload();
        let text = to_wire_json(&payload).unwrap();
        assert!(text.ends_with('\n'));
        let back: RulesPayload = from_wire_json(&text).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.rules[0].data.ddf_type, Some(DdfType::Perfect));
        assert_eq!(back.rules[1].data.ddf_type, Some(DdfType::NotOk));
    }

    #[test]
    fn test_action_is_opaque_passthrough() {
        let text = r#"{"rules":[{"action":"update","data":
            {"color":null,"column":0,"DDF_target_value":null,"DDF_type":null,
             "DDF_unit":null,"inverse":0,"linker":null,"operator":null,
             "operator2":null,"parametertype_id":9,"regex_filter":null,
             "show":1,"spec_id":4,"text":null,"translations":null,
             "value":null,"value2":null}}]}"#;
        let payload: RulesPayload = from_wire_json(text).unwrap();
        assert_eq!(payload.rules[0].action, "update");
    }

    #[test]
    fn test_spec_translations_double_encoding() {
        let translations = SpecRecord::default_translations("Vitamin premix");
        let inner: serde_json::Value = serde_json::from_str(&translations).unwrap();
        assert_eq!(inner["en"]["name"], "Vitamin premix");
        assert_eq!(inner["en"]["DDF_Defaulttext_OK"], "NULL");

        let record = SpecRecord {
            name: "Vitamin premix".to_string(),
            spec_type: Some(1),
            status: Some(0),
            archiviert: Some(0),
            order: None,
            translations: Some(translations),
        };
        let wire = serde_json::to_value(&record).unwrap();
        // On the wire the field is a string, not a nested object.
        assert!(wire["translations"].is_string());
    }
}
