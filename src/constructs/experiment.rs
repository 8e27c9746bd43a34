use super::parse_imported_arn;
use crate::cfn::{
    render_tags, CfnExperimentProps, CfnMetricGoalObject, CfnOnlineAbConfigObject, CfnResource,
    CfnTreatmentObject, CfnTreatmentToWeight,
};
use crate::error::{Error, Result};
use crate::models::{ExperimentProps, MetricGoal, OnlineAbConfig, ProjectRef, TreatmentConfig};
use crate::stack::Stack;
use crate::token::Token;

/// Evidently accepts at most this many metric goals per experiment.
pub const MAX_METRIC_GOALS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentAttributes {
    pub experiment_arn: String,
    pub treatments: Vec<TreatmentConfig>,
}

/// Handle to an Evidently experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    name: String,
    arn: Token,
    project: Option<ProjectRef>,
    treatments: Vec<TreatmentConfig>,
    logical_id: Option<String>,
}

impl Experiment {
    /// Register an `AWS::Evidently::Experiment` record with the stack.
    ///
    /// Fails with [`Error::InvalidArgument`] if more than
    /// [`MAX_METRIC_GOALS`] metric goals are given.
    pub fn new(stack: &mut Stack, id: &str, props: ExperimentProps) -> Result<Self> {
        if props.metric_goals.len() > MAX_METRIC_GOALS {
            return Err(Error::invalid_argument(format!(
                "experiment '{}' has {} metric goals, at most {} are allowed",
                props.name,
                props.metric_goals.len(),
                MAX_METRIC_GOALS
            )));
        }

        let record = render(&props);
        let logical_id = stack.add_resource(id, CfnResource::Experiment(record))?;

        Ok(Self {
            arn: Token::get_att(&logical_id, "Arn"),
            name: props.name,
            project: Some(props.project),
            treatments: props.treatments,
            logical_id: Some(logical_id),
        })
    }

    pub fn from_experiment_arn(arn: &str) -> Result<Self> {
        Self::from_experiment_attributes(ExperimentAttributes {
            experiment_arn: arn.to_string(),
            treatments: Vec::new(),
        })
    }

    pub fn from_experiment_attributes(attrs: ExperimentAttributes) -> Result<Self> {
        let imported = parse_imported_arn(&attrs.experiment_arn)?;
        Ok(Self {
            name: imported.name,
            arn: Token::from(attrs.experiment_arn),
            project: imported.project.map(ProjectRef::from),
            treatments: attrs.treatments,
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

    pub fn treatments(&self) -> &[TreatmentConfig] {
        &self.treatments
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.logical_id.as_deref()
    }

    pub fn is_imported(&self) -> bool {
        self.logical_id.is_none()
    }
}

fn render(props: &ExperimentProps) -> CfnExperimentProps {
    CfnExperimentProps {
        name: props.name.clone(),
        project: props.project.token().clone(),
        description: props.description.clone(),
        metric_goals: props.metric_goals.iter().map(render_metric_goal).collect(),
        online_ab_config: render_online_ab_config(&props.online_ab_config),
        treatments: props.treatments.iter().map(render_treatment).collect(),
        randomization_salt: props.randomization_salt.clone(),
        sampling_rate: props.sampling_rate,
        tags: render_tags(&props.tags),
    }
}

fn render_metric_goal(goal: &MetricGoal) -> CfnMetricGoalObject {
    CfnMetricGoalObject {
        desired_change: goal.desired_change.as_str().to_string(),
        entity_id_key: goal.entity_id_key.clone(),
        event_pattern: goal.event_pattern.clone(),
        metric_name: goal.metric_name.clone(),
        value_key: goal.value_key.clone(),
        unit_label: goal.unit_label.clone(),
    }
}

fn render_online_ab_config(config: &OnlineAbConfig) -> CfnOnlineAbConfigObject {
    let treatment_weights = if config.treatment_weights.is_empty() {
        None
    } else {
        Some(
            config
                .treatment_weights
                .iter()
                .map(|w| CfnTreatmentToWeight {
                    split_weight: w.split_weight,
                    treatment: w.treatment.clone(),
                })
                .collect(),
        )
    };

    CfnOnlineAbConfigObject {
        control_treatment_name: config.control_treatment_name.clone(),
        treatment_weights,
    }
}

fn render_treatment(treatment: &TreatmentConfig) -> CfnTreatmentObject {
    CfnTreatmentObject {
        feature: treatment.feature.name().to_string(),
        treatment_name: treatment.treatment_name.clone(),
        variation: treatment.variation.name().to_string(),
        description: treatment.description.clone(),
    }
}
