//! Cross-reference check for app configs.
//!
//! The constructs never check names against each other; Evidently does that
//! at deploy time. This pass finds the same problems up front so `evctl` can
//! warn about them, or refuse to synthesize in strict mode.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::config::AppConfig;
use crate::models::FeatureProps;

/// A name that does not resolve to anything in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// `kind 'name'` of the resource holding the reference.
    pub owner: String,
    pub message: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.owner, self.message)
    }
}

struct Checker<'a> {
    projects: HashSet<&'a str>,
    features: HashMap<&'a str, &'a FeatureProps>,
    found: Vec<DanglingReference>,
}

impl<'a> Checker<'a> {
    fn report(&mut self, owner: &str, message: String) {
        self.found.push(DanglingReference {
            owner: owner.to_string(),
            message,
        });
    }

    fn check_project(&mut self, owner: &str, project: Option<&str>) {
        // Handles and ARNs always resolve; only bare names can dangle.
        if let Some(name) = project {
            if !name.starts_with("arn:") && !self.projects.contains(name) {
                self.report(owner, format!("project '{}' is not defined", name));
            }
        }
    }

    fn check_variation(&mut self, owner: &str, feature: &str, variation: &str) {
        // Imported features are referenced by ARN; their variations are unknown.
        if feature.starts_with("arn:") {
            return;
        }
        match self.features.get(feature) {
            None => self.report(owner, format!("feature '{}' is not defined", feature)),
            Some(props) => {
                if !props.variations.iter().any(|v| v.name() == variation) {
                    self.report(
                        owner,
                        format!("feature '{}' has no variation '{}'", feature, variation),
                    );
                }
            }
        }
    }
}

/// Find every dangling name reference in `config`, in file order.
pub fn find_dangling(config: &AppConfig) -> Vec<DanglingReference> {
    let mut checker = Checker {
        projects: config.projects.iter().map(|p| p.name.as_str()).collect(),
        features: config
            .features
            .iter()
            .map(|f| (f.name.as_str(), f))
            .collect(),
        found: Vec::new(),
    };

    for feature in &config.features {
        let owner = format!("feature '{}'", feature.name);
        checker.check_project(&owner, feature.project.as_literal());

        let overrides = feature.entity_overrides.iter().map(|o| &o.variation_name);
        for variation in overrides.chain(feature.default_variation.as_ref()) {
            checker.check_variation(&owner, &feature.name, variation);
        }
    }

    for experiment in &config.experiments {
        let owner = format!("experiment '{}'", experiment.name);
        checker.check_project(&owner, experiment.project.as_literal());

        for treatment in &experiment.treatments {
            checker.check_variation(
                &owner,
                treatment.feature.name(),
                treatment.variation.name(),
            );
        }

        let treatments: HashSet<&str> = experiment
            .treatments
            .iter()
            .map(|t| t.treatment_name.as_str())
            .collect();
        let ab = &experiment.online_ab_config;
        let weighted = ab.treatment_weights.iter().map(|w| &w.treatment);
        for name in ab.control_treatment_name.iter().chain(weighted) {
            if !treatments.contains(name.as_str()) {
                checker.report(&owner, format!("treatment '{}' is not defined", name));
            }
        }
    }

    for launch in &config.launches {
        let owner = format!("launch '{}'", launch.name);
        checker.check_project(&owner, launch.project.as_literal());

        for group in &launch.groups {
            checker.check_variation(&owner, group.feature.name(), group.variation.name());
        }

        let groups: HashSet<&str> = launch.groups.iter().map(|g| g.group_name.as_str()).collect();
        for step in &launch.scheduled_splits_config {
            for weight in &step.group_weights {
                if !groups.contains(weight.group_name.as_str()) {
                    checker.report(
                        &owner,
                        format!(
                            "step at {} names unknown group '{}'",
                            step.start_time, weight.group_name
                        ),
                    );
                }
            }
        }
    }

    checker.found
}
