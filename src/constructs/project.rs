use super::{parse_imported_arn, SERVICE};
use crate::cfn::{
    render_tags, CfnDataDeliveryObject, CfnProjectProps, CfnResource, CfnS3Destination,
};
use crate::error::Result;
use crate::models::{DataDelivery, ProjectProps};
use crate::stack::Stack;
use crate::token::Token;

/// Handle to an Evidently project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    arn: Token,
    logical_id: Option<String>,
}

impl Project {
    /// Register an `AWS::Evidently::Project` record with the stack.
    pub fn new(stack: &mut Stack, id: &str, props: ProjectProps) -> Result<Self> {
        let record = render(&props);
        let logical_id = stack.add_resource(id, CfnResource::Project(record))?;

        Ok(Self {
            arn: Token::get_att(&logical_id, "Arn"),
            name: props.name,
            logical_id: Some(logical_id),
        })
    }

    /// Reference an existing project by ARN.
    pub fn from_project_arn(arn: &str) -> Result<Self> {
        let imported = parse_imported_arn(arn)?;
        Ok(Self {
            name: imported.name,
            arn: Token::from(arn),
            logical_id: None,
        })
    }

    /// Reference an existing project in the stack's account and region by name.
    pub fn from_project_name(stack: &Stack, name: &str) -> Self {
        Self {
            name: name.to_string(),
            arn: Token::from(stack.format_arn(SERVICE, &format!("project/{}", name))),
            logical_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arn(&self) -> &Token {
        &self.arn
    }

    /// Logical id in the stack, `None` for imported projects.
    pub fn logical_id(&self) -> Option<&str> {
        self.logical_id.as_deref()
    }

    pub fn is_imported(&self) -> bool {
        self.logical_id.is_none()
    }
}

fn render(props: &ProjectProps) -> CfnProjectProps {
    CfnProjectProps {
        name: props.name.clone(),
        description: props.description.clone(),
        data_delivery: props.data_delivery.as_ref().map(render_data_delivery),
        tags: render_tags(&props.tags),
    }
}

fn render_data_delivery(data_delivery: &DataDelivery) -> CfnDataDeliveryObject {
    match data_delivery {
        DataDelivery::LogGroup(log_group) => CfnDataDeliveryObject {
            log_group: Some(log_group.clone()),
            s3: None,
        },
        DataDelivery::S3(s3) => CfnDataDeliveryObject {
            log_group: None,
            s3: Some(CfnS3Destination {
                bucket_name: s3.bucket_name.clone(),
                prefix: s3.prefix.clone(),
            }),
        },
    }
}
