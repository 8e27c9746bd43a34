use serde::Serialize;

use super::CfnTag;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnLaunchProps {
    pub name: String,
    pub project: Token,
    /// Always rendered, even when empty.
    pub description: String,
    pub groups: Vec<CfnLaunchGroupObject>,
    pub scheduled_splits_config: Vec<CfnStepConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub randomization_salt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CfnTag>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnLaunchGroupObject {
    /// Feature name, not ARN.
    pub feature: String,
    pub group_name: String,
    /// Variation name; empty for unnamed variations.
    pub variation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnStepConfig {
    pub group_weights: Vec<CfnGroupToWeight>,
    /// ISO-8601 UTC timestamp.
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnGroupToWeight {
    pub group_name: String,
    pub split_weight: u32,
}
