use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ProjectRef, Variation, VariationRef};

/// Props for an Evidently feature.
///
/// A feature is a flag with a set of typed variations. At least one variation
/// is required; the feature construct rejects an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProps {
    pub name: String,
    pub project: ProjectRef,
    pub variations: Vec<Variation>,
    /// Entities that always receive a given variation.
    #[serde(default)]
    pub entity_overrides: Vec<EntityOverride>,
    pub description: Option<String>,
    pub evaluation_strategy: Option<EvaluationStrategy>,
    /// Name of the variation served when no launch or experiment applies.
    pub default_variation: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl FeatureProps {
    pub fn new(
        name: impl Into<String>,
        project: impl Into<ProjectRef>,
        variations: Vec<Variation>,
    ) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            variations,
            entity_overrides: Vec::new(),
            description: None,
            evaluation_strategy: None,
            default_variation: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_entity_overrides(mut self, overrides: Vec<EntityOverride>) -> Self {
        self.entity_overrides = overrides;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_evaluation_strategy(mut self, strategy: EvaluationStrategy) -> Self {
        self.evaluation_strategy = Some(strategy);
        self
    }

    pub fn with_default_variation(mut self, variation: impl Into<VariationRef>) -> Self {
        let variation: VariationRef = variation.into();
        self.default_variation = Some(variation.name().to_string());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Forces a specific entity (user id, session id, ...) onto a variation.
///
/// The variation is referenced by name and is not checked against the
/// feature's variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityOverride {
    pub entity_id: String,
    #[serde(alias = "variation")]
    pub variation_name: String,
}

impl EntityOverride {
    pub fn new(entity_id: impl Into<String>, variation: impl Into<VariationRef>) -> Self {
        let variation: VariationRef = variation.into();
        Self {
            entity_id: entity_id.into(),
            variation_name: variation.name().to_string(),
        }
    }
}

/// How a feature is evaluated when launches or experiments are running.
///
/// - `AllRules`: launches and experiments apply
/// - `DefaultVariation`: everyone gets the default variation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStrategy {
    AllRules,
    DefaultVariation,
}

impl EvaluationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllRules => "ALL_RULES",
            Self::DefaultVariation => "DEFAULT_VARIATION",
        }
    }
}
