use serde::Serialize;

use super::CfnTag;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnFeatureProps {
    pub name: String,
    /// Name or ARN of the owning project.
    pub project: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_variation: Option<String>,
    pub variations: Vec<CfnVariationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_overrides: Option<Vec<CfnEntityOverride>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CfnTag>>,
}

/// One variation. Exactly one of the four `*_value` fields is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnVariationObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnEntityOverride {
    pub entity_id: String,
    pub variation: String,
}
