use chrono::SecondsFormat;

use super::parse_imported_arn;
use crate::cfn::{
    render_tags, CfnGroupToWeight, CfnLaunchGroupObject, CfnLaunchProps, CfnResource,
    CfnStepConfig,
};
use crate::error::{Error, Result};
use crate::models::{LaunchGroup, LaunchProps, ProjectRef, StepConfig};
use crate::stack::Stack;
use crate::token::Token;

/// Evidently accepts at most this many groups per launch.
pub const MAX_LAUNCH_GROUPS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchAttributes {
    pub launch_arn: String,
    pub groups: Vec<LaunchGroup>,
}

/// Handle to an Evidently launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    name: String,
    arn: Token,
    project: Option<ProjectRef>,
    groups: Vec<LaunchGroup>,
    logical_id: Option<String>,
}

impl Launch {
    /// Register an `AWS::Evidently::Launch` record with the stack.
    ///
    /// Fails with [`Error::InvalidArgument`] if more than
    /// [`MAX_LAUNCH_GROUPS`] groups are given. Step group names, start time
    /// ordering and weight totals are left for Evidently to check.
    pub fn new(stack: &mut Stack, id: &str, props: LaunchProps) -> Result<Self> {
        if props.groups.len() > MAX_LAUNCH_GROUPS {
            return Err(Error::invalid_argument(format!(
                "launch '{}' has {} groups, at most {} are allowed",
                props.name,
                props.groups.len(),
                MAX_LAUNCH_GROUPS
            )));
        }

        let record = render(&props);
        let logical_id = stack.add_resource(id, CfnResource::Launch(record))?;

        Ok(Self {
            arn: Token::get_att(&logical_id, "Arn"),
            name: props.name,
            project: Some(props.project),
            groups: props.groups,
            logical_id: Some(logical_id),
        })
    }

    pub fn from_launch_arn(arn: &str) -> Result<Self> {
        Self::from_launch_attributes(LaunchAttributes {
            launch_arn: arn.to_string(),
            groups: Vec::new(),
        })
    }

    pub fn from_launch_attributes(attrs: LaunchAttributes) -> Result<Self> {
        let imported = parse_imported_arn(&attrs.launch_arn)?;
        Ok(Self {
            name: imported.name,
            arn: Token::from(attrs.launch_arn),
            project: imported.project.map(ProjectRef::from),
            groups: attrs.groups,
            logical_id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arn(&self) -> &Token {
        &self.arn
    }

    pub fn project(&self) -> Option<&ProjectRef> {
        self.project.as_ref()
    }

    pub fn groups(&self) -> &[LaunchGroup] {
        &self.groups
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.logical_id.as_deref()
    }

    pub fn is_imported(&self) -> bool {
        self.logical_id.is_none()
    }
}

fn render(props: &LaunchProps) -> CfnLaunchProps {
    CfnLaunchProps {
        name: props.name.clone(),
        project: props.project.token().clone(),
        // Launches always carry a description; the other resources omit it.
        description: props.description.clone().unwrap_or_default(),
        groups: props.groups.iter().map(render_group).collect(),
        scheduled_splits_config: props.scheduled_splits_config.iter().map(render_step).collect(),
        randomization_salt: props.randomization_salt.clone(),
        tags: render_tags(&props.tags),
    }
}

fn render_group(group: &LaunchGroup) -> CfnLaunchGroupObject {
    CfnLaunchGroupObject {
        feature: group.feature.name().to_string(),
        group_name: group.group_name.clone(),
        variation: group.variation.name().to_string(),
        description: group.description.clone(),
    }
}

fn render_step(step: &StepConfig) -> CfnStepConfig {
    CfnStepConfig {
        group_weights: step
            .group_weights
            .iter()
            .map(|w| CfnGroupToWeight {
                group_name: w.group_name.clone(),
                split_weight: w.split_weight,
            })
            .collect(),
        start_time: step.start_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    }
}
