use serde::Serialize;

use super::CfnTag;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnExperimentProps {
    pub name: String,
    pub project: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub metric_goals: Vec<CfnMetricGoalObject>,
    pub online_ab_config: CfnOnlineAbConfigObject,
    pub treatments: Vec<CfnTreatmentObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub randomization_salt: Option<String>,
    /// Portion of traffic to sample, in thousandths of a percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CfnTag>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnMetricGoalObject {
    pub desired_change: String,
    pub entity_id_key: String,
    pub event_pattern: String,
    pub metric_name: String,
    pub value_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnOnlineAbConfigObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_treatment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_weights: Option<Vec<CfnTreatmentToWeight>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnTreatmentToWeight {
    pub split_weight: u32,
    pub treatment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnTreatmentObject {
    pub feature: String,
    pub treatment_name: String,
    pub variation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
