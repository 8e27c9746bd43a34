use super::parse_imported_arn;
use crate::cfn::{render_tags, CfnEntityOverride, CfnFeatureProps, CfnResource};
use crate::error::{Error, Result};
use crate::models::{FeatureProps, ProjectRef, Variation, VariationValue};
use crate::stack::Stack;
use crate::token::Token;

/// Attributes for referencing an existing feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAttributes {
    pub feature_arn: String,
    /// Variations the caller knows the feature has. Not verified.
    pub variations: Vec<Variation>,
}

/// Handle to an Evidently feature.
///
/// Launch groups and treatments refer to a feature by its name, which is what
/// [`FeatureRef::from`](crate::models::FeatureRef) takes from this handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    arn: Token,
    project: Option<ProjectRef>,
    variations: Vec<Variation>,
    logical_id: Option<String>,
}

impl Feature {
    /// Register an `AWS::Evidently::Feature` record with the stack.
    ///
    /// Fails with [`Error::InvalidArgument`] if `props.variations` is empty or
    /// a double variation is NaN or infinite, which has no JSON form.
    pub fn new(stack: &mut Stack, id: &str, props: FeatureProps) -> Result<Self> {
        if props.variations.is_empty() {
            return Err(Error::invalid_argument(format!(
                "feature '{}' must have at least one variation",
                props.name
            )));
        }
        let non_finite = props.variations.iter().find(|v| {
            matches!(v.value(), VariationValue::Double(d) if !d.is_finite())
        });
        if let Some(variation) = non_finite {
            return Err(Error::invalid_argument(format!(
                "feature '{}' variation '{}' has a non-finite double value",
                props.name,
                variation.name()
            )));
        }

        let record = render(&props);
        let logical_id = stack.add_resource(id, CfnResource::Feature(record))?;

        Ok(Self {
            arn: Token::get_att(&logical_id, "Arn"),
            name: props.name,
            project: Some(props.project),
            variations: props.variations,
            logical_id: Some(logical_id),
        })
    }

    /// Reference an existing feature by ARN. The handle has no known variations.
    pub fn from_feature_arn(arn: &str) -> Result<Self> {
        Self::from_feature_attributes(FeatureAttributes {
            feature_arn: arn.to_string(),
            variations: Vec::new(),
        })
    }

    pub fn from_feature_attributes(attrs: FeatureAttributes) -> Result<Self> {
        let imported = parse_imported_arn(&attrs.feature_arn)?;
        Ok(Self {
            name: imported.name,
            arn: Token::from(attrs.feature_arn),
            project: imported.project.map(ProjectRef::from),
            variations: attrs.variations,
            logical_id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arn(&self) -> &Token {
        &self.arn
    }

    /// The owning project, if known. Imported ARNs carry the project name.
    pub fn project(&self) -> Option<&ProjectRef> {
        self.project.as_ref()
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    /// Find a variation by name. Unnamed variations match `""`.
    pub fn variation(&self, name: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.name() == name)
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.logical_id.as_deref()
    }

    pub fn is_imported(&self) -> bool {
        self.logical_id.is_none()
    }
}

fn render(props: &FeatureProps) -> CfnFeatureProps {
    let entity_overrides = if props.entity_overrides.is_empty() {
        None
    } else {
        Some(
            props
                .entity_overrides
                .iter()
                .map(|o| CfnEntityOverride {
                    entity_id: o.entity_id.clone(),
                    variation: o.variation_name.clone(),
                })
                .collect(),
        )
    };

    CfnFeatureProps {
        name: props.name.clone(),
        project: props.project.token().clone(),
        description: props.description.clone(),
        evaluation_strategy: props
            .evaluation_strategy
            .map(|s| s.as_str().to_string()),
        default_variation: props.default_variation.clone(),
        variations: props.variations.iter().map(Variation::render).collect(),
        entity_overrides,
        tags: render_tags(&props.tags),
    }
}
