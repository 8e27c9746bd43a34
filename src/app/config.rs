use std::fs;
use std::path::Path;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{ExperimentProps, FeatureProps, LaunchProps, ProjectProps};

/// Env var that overrides the stack name from the config file.
pub const STACK_NAME_ENV: &str = "EVCTL_STACK_NAME";

/// An application file: everything that goes into one stack.
///
/// Features, experiments and launches name their project with a string. If the
/// string matches a project defined in the same file it resolves to that
/// project's ARN; otherwise it is passed through as an external name or ARN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub stack_name: String,
    pub account: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectProps>,
    #[serde(default)]
    pub features: Vec<FeatureProps>,
    #[serde(default)]
    pub experiments: Vec<ExperimentProps>,
    #[serde(default)]
    pub launches: Vec<LaunchProps>,
}

impl AppConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, applying the `EVCTL_STACK_NAME` override.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Ok(stack_name) = std::env::var(STACK_NAME_ENV) {
            tracing::debug!("Stack name overridden by {}: {}", STACK_NAME_ENV, stack_name);
            config.stack_name = stack_name;
        }

        Ok(config)
    }

    /// Structural checks that do not depend on the constructs themselves.
    pub fn validate(&self) -> Result<()> {
        if self.stack_name.trim().is_empty() {
            return Err(Error::Config("stackName must not be empty".to_string()));
        }
        if self.account.is_some() != self.region.is_some() {
            return Err(Error::Config(
                "account and region must be given together".to_string(),
            ));
        }
        Ok(())
    }

    /// The JSON Schema for app config files.
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(AppConfig).to_value()
    }
}
