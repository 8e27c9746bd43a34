use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Props for an Evidently project.
///
/// Projects are the top-level organizational unit. Features, experiments and
/// launches all belong to exactly one project. `name` is the physical name of
/// the project and must be unique in the account and region; that is checked
/// by CloudFormation, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProps {
    pub name: String,
    pub description: Option<String>,
    /// Where evaluation events are stored. `None` keeps them inside Evidently.
    pub data_delivery: Option<DataDelivery>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ProjectProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_delivery: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_data_delivery(mut self, data_delivery: DataDelivery) -> Self {
        self.data_delivery = Some(data_delivery);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Destination for evaluation events.
///
/// A project delivers to a CloudWatch Logs log group or an S3 bucket, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum DataDelivery {
    /// Name of the CloudWatch Logs log group.
    LogGroup(String),
    S3(S3Destination),
}

impl DataDelivery {
    pub fn log_group(log_group_name: impl Into<String>) -> Self {
        Self::LogGroup(log_group_name.into())
    }

    pub fn s3(bucket_name: impl Into<String>, prefix: Option<String>) -> Self {
        Self::S3(S3Destination {
            bucket_name: bucket_name.into(),
            prefix,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct S3Destination {
    pub bucket_name: String,
    /// Key prefix inside the bucket.
    pub prefix: Option<String>,
}
