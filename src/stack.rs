//! The provisioning scope constructs register their records with.
//!
//! A [`Stack`] is an in-memory CloudFormation template: an ordered set of
//! resource records keyed by logical id, plus optional outputs. It does not
//! deploy anything. Physical name uniqueness is left to CloudFormation; the
//! stack only refuses two records with the same logical id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cfn::CfnResource;
use crate::error::{Error, Result};
use crate::token::Token;

pub const DEFAULT_PARTITION: &str = "aws";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_ACCOUNT: &str = "123456789012";

/// A stack output, e.g. the ARN of a created project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    partition: String,
    region: String,
    account: String,
    resources: BTreeMap<String, CfnResource>,
    outputs: BTreeMap<String, Output>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Template<'a> {
    resources: &'a BTreeMap<String, CfnResource>,
    #[serde(skip_serializing_if = "has_no_outputs")]
    outputs: &'a BTreeMap<String, Output>,
}

fn has_no_outputs(outputs: &&BTreeMap<String, Output>) -> bool {
    outputs.is_empty()
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition: DEFAULT_PARTITION.to_string(),
            region: DEFAULT_REGION.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Pin the stack to an account and region.
    pub fn with_env(mut self, account: impl Into<String>, region: impl Into<String>) -> Self {
        self.account = account.into();
        self.region = region.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Build an ARN for a resource of `service` inside this stack's environment.
    pub fn format_arn(&self, service: &str, resource: &str) -> String {
        format!(
            "arn:{}:{}:{}:{}:{}",
            self.partition, service, self.region, self.account, resource
        )
    }

    /// Register a resource record under the logical id derived from `id`.
    ///
    /// Returns the logical id so the construct can reference its own attributes.
    pub fn add_resource(&mut self, id: &str, resource: CfnResource) -> Result<String> {
        let logical_id = logical_id(id)?;
        if self.resources.contains_key(&logical_id) {
            return Err(Error::DuplicateLogicalId(logical_id));
        }

        tracing::debug!(
            stack = %self.name,
            logical_id = %logical_id,
            resource_type = resource.resource_type(),
            name = resource.name(),
            "Registered resource"
        );
        self.resources.insert(logical_id.clone(), resource);
        Ok(logical_id)
    }

    pub fn add_output(
        &mut self,
        id: &str,
        value: Token,
        description: Option<String>,
    ) -> Result<()> {
        let logical_id = logical_id(id)?;
        if self.outputs.contains_key(&logical_id) {
            return Err(Error::DuplicateLogicalId(logical_id));
        }
        self.outputs.insert(logical_id, Output { value, description });
        Ok(())
    }

    pub fn resource(&self, logical_id: &str) -> Option<&CfnResource> {
        self.resources.get(logical_id)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &CfnResource)> {
        self.resources.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn outputs(&self) -> &BTreeMap<String, Output> {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Render the template document.
    pub fn to_template(&self) -> Result<serde_json::Value> {
        let template = Template {
            resources: &self.resources,
            outputs: &self.outputs,
        };
        Ok(serde_json::to_value(template)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_template()?)?)
    }
}

/// CloudFormation logical ids are alphanumeric; anything else is dropped.
fn logical_id(id: &str) -> Result<String> {
    let logical_id: String = id.chars().filter(char::is_ascii_alphanumeric).collect();
    if logical_id.is_empty() {
        return Err(Error::invalid_argument(format!(
            "construct id '{}' has no alphanumeric characters",
            id
        )));
    }
    Ok(logical_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfn::CfnProjectProps;
    use serde_json::json;

    fn project(name: &str) -> CfnResource {
        CfnResource::Project(CfnProjectProps {
            name: name.to_string(),
            description: None,
            data_delivery: None,
            tags: None,
        })
    }

    #[test]
    fn test_logical_id_strips_punctuation() {
        assert_eq!(logical_id("my-project_1").unwrap(), "myproject1");
        assert!(logical_id("--").is_err());
    }

    #[test]
    fn test_add_and_render() {
        let mut stack = Stack::new("TestStack");
        let id = stack.add_resource("MyProject", project("myProject")).unwrap();
        assert_eq!(id, "MyProject");
        assert_eq!(stack.len(), 1);

        let template = stack.to_template().unwrap();
        assert_eq!(
            template,
            json!({
                "Resources": {
                    "MyProject": {
                        "Type": "AWS::Evidently::Project",
                        "Properties": { "Name": "myProject" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_duplicate_logical_id() {
        let mut stack = Stack::new("TestStack");
        stack.add_resource("Project", project("a")).unwrap();
        let err = stack.add_resource("Project", project("b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateLogicalId(id) if id == "Project"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_outputs_rendered() {
        let mut stack = Stack::new("TestStack");
        stack
            .add_output("ProjectArn", Token::get_att("P", "Arn"), None)
            .unwrap();
        let template = stack.to_template().unwrap();
        assert_eq!(
            template["Outputs"]["ProjectArn"],
            json!({ "Value": { "Fn::GetAtt": ["P", "Arn"] } })
        );
    }

    #[test]
    fn test_format_arn() {
        let stack = Stack::new("S").with_env("111122223333", "eu-west-1");
        assert_eq!(
            stack.format_arn("evidently", "project/p"),
            "arn:aws:evidently:eu-west-1:111122223333:project/p"
        );
    }
}
