use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{FeatureRef, ProjectRef, VariationRef};

/// Props for an Evidently experiment.
///
/// An experiment compares treatments (a feature variation each) against up to
/// three metric goals. Traffic is split by [`OnlineAbConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentProps {
    pub name: String,
    pub project: ProjectRef,
    pub metric_goals: Vec<MetricGoal>,
    pub online_ab_config: OnlineAbConfig,
    pub treatments: Vec<TreatmentConfig>,
    pub description: Option<String>,
    pub randomization_salt: Option<String>,
    /// Portion of audience traffic sampled, in thousandths of a percent.
    pub sampling_rate: Option<u32>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ExperimentProps {
    pub fn new(
        name: impl Into<String>,
        project: impl Into<ProjectRef>,
        metric_goals: Vec<MetricGoal>,
        online_ab_config: OnlineAbConfig,
        treatments: Vec<TreatmentConfig>,
    ) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            metric_goals,
            online_ab_config,
            treatments,
            description: None,
            randomization_salt: None,
            sampling_rate: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_randomization_salt(mut self, salt: impl Into<String>) -> Self {
        self.randomization_salt = Some(salt.into());
        self
    }

    pub fn with_sampling_rate(mut self, sampling_rate: u32) -> Self {
        self.sampling_rate = Some(sampling_rate);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A metric the experiment tracks and the direction that counts as better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricGoal {
    pub desired_change: DesiredChange,
    /// JSON path to the entity id in the event, e.g. `$.details.userId`.
    pub entity_id_key: String,
    /// EventBridge pattern selecting the events that feed this metric.
    pub event_pattern: String,
    pub metric_name: String,
    /// JSON path to the metric value in the event.
    pub value_key: String,
    pub unit_label: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesiredChange {
    Increase,
    Decrease,
}

impl DesiredChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "INCREASE",
            Self::Decrease => "DECREASE",
        }
    }
}

/// Traffic split between treatments.
///
/// Weights are passed through as given. Nothing checks that they sum to
/// 100000 or that the named treatments exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnlineAbConfig {
    pub control_treatment_name: Option<String>,
    #[serde(default)]
    pub treatment_weights: Vec<TreatmentToWeight>,
}

impl OnlineAbConfig {
    pub fn new(control_treatment_name: impl Into<String>) -> Self {
        Self {
            control_treatment_name: Some(control_treatment_name.into()),
            treatment_weights: Vec::new(),
        }
    }

    pub fn with_weight(mut self, treatment: impl Into<String>, split_weight: u32) -> Self {
        self.treatment_weights.push(TreatmentToWeight {
            treatment: treatment.into(),
            split_weight,
        });
        self
    }
}

/// Share of experiment traffic for one treatment, in thousandths of a percent
/// (`0..=100000`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentToWeight {
    #[serde(alias = "treatmentName")]
    pub treatment: String,
    pub split_weight: u32,
}

/// One arm of an experiment: a feature variation under a treatment name.
///
/// Feature and variation may be given as handles or as bare names; both
/// render identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentConfig {
    pub feature: FeatureRef,
    pub treatment_name: String,
    pub variation: VariationRef,
    pub description: Option<String>,
}

impl TreatmentConfig {
    pub fn new(
        treatment_name: impl Into<String>,
        feature: impl Into<FeatureRef>,
        variation: impl Into<VariationRef>,
    ) -> Self {
        Self {
            feature: feature.into(),
            treatment_name: treatment_name.into(),
            variation: variation.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
