//! Low-level CloudFormation bindings for the `AWS::Evidently::*` resource types.
//!
//! These structs mirror the CloudFormation resource schema field for field. They are
//! what the constructs in [`crate::constructs`] render into and carry no
//! validation of their own. Optional fields that are `None` are left out of
//! the template entirely.

mod experiment;
mod feature;
mod launch;
mod project;

use std::collections::BTreeMap;

use serde::Serialize;

pub use experiment::*;
pub use feature::*;
pub use launch::*;
pub use project::*;

/// A resource record as registered with a [`Stack`](crate::stack::Stack).
///
/// Serializes to `{"Type": "AWS::Evidently::...", "Properties": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum CfnResource {
    #[serde(rename = "AWS::Evidently::Project")]
    Project(CfnProjectProps),
    #[serde(rename = "AWS::Evidently::Feature")]
    Feature(CfnFeatureProps),
    #[serde(rename = "AWS::Evidently::Experiment")]
    Experiment(CfnExperimentProps),
    #[serde(rename = "AWS::Evidently::Launch")]
    Launch(CfnLaunchProps),
}

impl CfnResource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Project(_) => "AWS::Evidently::Project",
            Self::Feature(_) => "AWS::Evidently::Feature",
            Self::Experiment(_) => "AWS::Evidently::Experiment",
            Self::Launch(_) => "AWS::Evidently::Launch",
        }
    }

    /// The physical `Name` property of the record.
    pub fn name(&self) -> &str {
        match self {
            Self::Project(p) => &p.name,
            Self::Feature(p) => &p.name,
            Self::Experiment(p) => &p.name,
            Self::Launch(p) => &p.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnTag {
    pub key: String,
    pub value: String,
}

/// Render a tag map as a CloudFormation tag list, or `None` when empty.
pub fn render_tags(tags: &BTreeMap<String, String>) -> Option<Vec<CfnTag>> {
    if tags.is_empty() {
        return None;
    }
    Some(
        tags.iter()
            .map(|(key, value)| CfnTag {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
    )
}
