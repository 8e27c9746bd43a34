use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::cfn::CfnVariationObject;

/// The type of value a variation carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariationValueType {
    Boolean,
    Double,
    Long,
    String,
}

impl VariationValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Double => "DOUBLE",
            Self::Long => "LONG",
            Self::String => "STRING",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BOOLEAN" => Some(Self::Boolean),
            "DOUBLE" => Some(Self::Double),
            "LONG" => Some(Self::Long),
            "STRING" => Some(Self::String),
            _ => None,
        }
    }
}

/// A typed variation value. The variant is the value type, so a value can
/// never disagree with its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum VariationValue {
    Boolean(bool),
    Double(f64),
    Long(i64),
    String(String),
}

impl VariationValue {
    pub fn value_type(&self) -> VariationValueType {
        match self {
            Self::Boolean(_) => VariationValueType::Boolean,
            Self::Double(_) => VariationValueType::Double,
            Self::Long(_) => VariationValueType::Long,
            Self::String(_) => VariationValueType::String,
        }
    }
}

impl From<bool> for VariationValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for VariationValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i64> for VariationValue {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<&str> for VariationValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for VariationValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// One variation of a feature: an optional name and a typed value.
///
/// In config files a variation is written as
/// `{"name": "on", "valueType": "BOOLEAN", "value": true}`; a `value` that does
/// not match `valueType` is rejected while decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVariation", into = "RawVariation")]
pub struct Variation {
    name: Option<String>,
    value: VariationValue,
}

impl Variation {
    /// An unnamed variation. Its [`name`](Self::name) is the empty string.
    pub fn new(value: impl Into<VariationValue>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<VariationValue>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::named(name, value)
    }

    pub fn double(name: impl Into<String>, value: f64) -> Self {
        Self::named(name, value)
    }

    pub fn long(name: impl Into<String>, value: i64) -> Self {
        Self::named(name, value)
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::named(name, value.into())
    }

    /// The variation name, or `""` when the variation was built without one.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn value(&self) -> &VariationValue {
        &self.value
    }

    pub fn value_type(&self) -> VariationValueType {
        self.value.value_type()
    }

    /// Project the value into the one output field matching its type.
    pub(crate) fn render(&self) -> CfnVariationObject {
        let mut out = CfnVariationObject {
            variation_name: self.name.clone(),
            ..Default::default()
        };
        match &self.value {
            VariationValue::Boolean(v) => out.boolean_value = Some(*v),
            VariationValue::Double(v) => out.double_value = Some(*v),
            VariationValue::Long(v) => out.long_value = Some(*v),
            VariationValue::String(v) => out.string_value = Some(v.clone()),
        }
        out
    }
}

impl JsonSchema for Variation {
    fn schema_name() -> Cow<'static, str> {
        "Variation".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        RawVariation::json_schema(generator)
    }
}

/// Wire form of a [`Variation`] in config files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawVariation {
    pub name: Option<String>,
    pub value_type: VariationValueType,
    pub value: serde_json::Value,
}

impl TryFrom<RawVariation> for Variation {
    type Error = String;

    fn try_from(raw: RawVariation) -> Result<Self, Self::Error> {
        let mismatch = || {
            format!(
                "variation '{}' has valueType {} but value {}",
                raw.name.as_deref().unwrap_or_default(),
                raw.value_type.as_str(),
                raw.value
            )
        };
        let value = match raw.value_type {
            VariationValueType::Boolean => raw.value.as_bool().map(VariationValue::Boolean),
            VariationValueType::Double => raw.value.as_f64().map(VariationValue::Double),
            VariationValueType::Long => raw.value.as_i64().map(VariationValue::Long),
            VariationValueType::String => raw
                .value
                .as_str()
                .map(|s| VariationValue::String(s.to_string())),
        }
        .ok_or_else(mismatch)?;

        Ok(Self {
            name: raw.name,
            value,
        })
    }
}

impl From<Variation> for RawVariation {
    fn from(v: Variation) -> Self {
        let value_type = v.value_type();
        let value = match v.value {
            VariationValue::Boolean(b) => serde_json::Value::from(b),
            VariationValue::Double(d) => serde_json::Value::from(d),
            VariationValue::Long(l) => serde_json::Value::from(l),
            VariationValue::String(s) => serde_json::Value::from(s),
        };
        Self {
            name: v.name,
            value_type,
            value,
        }
    }
}
