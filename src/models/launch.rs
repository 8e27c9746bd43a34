use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{FeatureRef, ProjectRef, VariationRef};

/// Props for an Evidently launch.
///
/// A launch rolls feature variations out to launch groups and moves traffic
/// between them on a schedule. At most five groups are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaunchProps {
    pub name: String,
    pub project: ProjectRef,
    #[serde(default)]
    pub groups: Vec<LaunchGroup>,
    /// Steps in the order they should be applied.
    #[serde(default)]
    pub scheduled_splits_config: Vec<StepConfig>,
    /// Rendered as `""` when absent.
    pub description: Option<String>,
    pub randomization_salt: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl LaunchProps {
    pub fn new(
        name: impl Into<String>,
        project: impl Into<ProjectRef>,
        groups: Vec<LaunchGroup>,
        scheduled_splits_config: Vec<StepConfig>,
    ) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            groups,
            scheduled_splits_config,
            description: None,
            randomization_salt: None,
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

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A feature variation served to one slice of launch traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaunchGroup {
    pub feature: FeatureRef,
    pub group_name: String,
    pub variation: VariationRef,
    pub description: Option<String>,
}

impl LaunchGroup {
    pub fn new(
        group_name: impl Into<String>,
        feature: impl Into<FeatureRef>,
        variation: impl Into<VariationRef>,
    ) -> Self {
        Self {
            feature: feature.into(),
            group_name: group_name.into(),
            variation: variation.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupToWeight {
    pub group_name: String,
    /// Thousandths of a percent.
    pub split_weight: u32,
}

/// One scheduled traffic split, effective from `start_time`.
///
/// Group names, ordering and weight totals are checked by Evidently at
/// deploy time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    pub group_weights: Vec<GroupToWeight>,
    pub start_time: DateTime<Utc>,
}

impl StepConfig {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            group_weights: Vec::new(),
            start_time,
        }
    }

    pub fn with_weight(mut self, group_name: impl Into<String>, split_weight: u32) -> Self {
        self.group_weights.push(GroupToWeight {
            group_name: group_name.into(),
            split_weight,
        });
        self
    }
}
