use serde::Serialize;

use super::CfnTag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnProjectProps {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_delivery: Option<CfnDataDeliveryObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CfnTag>>,
}

/// Exactly one of `log_group` and `s3` is set by the project construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnDataDeliveryObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group: Option<String>,
    #[serde(rename = "S3", skip_serializing_if = "Option::is_none")]
    pub s3: Option<CfnS3Destination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnS3Destination {
    pub bucket_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}
