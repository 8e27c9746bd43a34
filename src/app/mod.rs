//! Synthesis of a whole app config into one stack.
//!
//! Resources are created in dependency order (projects, features,
//! experiments, launches) so that project names used in the same file resolve
//! to the created project's ARN.

mod config;
mod references;

use std::collections::HashMap;

use sha2::{Digest, Sha256};

pub use config::*;
pub use references::*;

use crate::constructs::{Experiment, Feature, Launch, Project};
use crate::error::{Error, Result};
use crate::models::ProjectRef;
use crate::stack::Stack;
use crate::token::Token;

#[derive(Debug, Clone, Copy, Default)]
pub struct SynthOptions {
    /// Fail on dangling name references instead of logging them.
    pub strict: bool,
    /// Add an `<id>Arn` output for every created resource.
    pub outputs: bool,
}

/// Build every resource in `config` into a new stack.
pub fn synth(config: AppConfig, options: SynthOptions) -> Result<Stack> {
    config.validate()?;
    check_references(&config, options.strict)?;

    let mut stack = Stack::new(config.stack_name.clone());
    if let (Some(account), Some(region)) = (&config.account, &config.region) {
        stack = stack.with_env(account.clone(), region.clone());
    }

    let mut ids = ConstructIds::default();
    let mut projects: HashMap<String, Project> = HashMap::new();
    for props in config.projects {
        let id = ids.allocate("Project", &props.name);
        let project = Project::new(&mut stack, &id, props)?;
        add_arn_output(&mut stack, options, &id, project.arn())?;
        projects.insert(project.name().to_string(), project);
    }

    for mut props in config.features {
        props.project = resolve_project(&projects, props.project);
        let id = ids.allocate("Feature", &props.name);
        let feature = Feature::new(&mut stack, &id, props)?;
        add_arn_output(&mut stack, options, &id, feature.arn())?;
    }

    for mut props in config.experiments {
        props.project = resolve_project(&projects, props.project);
        let id = ids.allocate("Experiment", &props.name);
        let experiment = Experiment::new(&mut stack, &id, props)?;
        add_arn_output(&mut stack, options, &id, experiment.arn())?;
    }

    for mut props in config.launches {
        props.project = resolve_project(&projects, props.project);
        let id = ids.allocate("Launch", &props.name);
        let launch = Launch::new(&mut stack, &id, props)?;
        add_arn_output(&mut stack, options, &id, launch.arn())?;
    }

    tracing::info!(
        stack = stack.name(),
        resources = stack.len(),
        "Synthesized stack"
    );
    Ok(stack)
}

/// Run the cross-reference check. In strict mode any finding is an error;
/// otherwise findings are logged and synthesis continues.
pub fn check_references(config: &AppConfig, strict: bool) -> Result<Vec<DanglingReference>> {
    let dangling = find_dangling(config);
    if strict && !dangling.is_empty() {
        let msg = dangling
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::DanglingReference(msg));
    }
    for reference in &dangling {
        tracing::warn!("Unresolved reference in {}", reference);
    }
    Ok(dangling)
}

fn resolve_project(projects: &HashMap<String, Project>, project: ProjectRef) -> ProjectRef {
    match project.as_literal().and_then(|name| projects.get(name)) {
        Some(defined) => ProjectRef::from(defined),
        None => project,
    }
}

fn add_arn_output(stack: &mut Stack, options: SynthOptions, id: &str, arn: &Token) -> Result<()> {
    if options.outputs {
        stack.add_output(&format!("{}Arn", id), arn.clone(), None)?;
    }
    Ok(())
}

/// Construct ids handed out during one synthesis, keyed by the id they were
/// given to. Distinct names always get distinct ids; the same kind and name
/// twice gets the same id, so the stack reports the duplicate.
#[derive(Default)]
struct ConstructIds {
    taken: HashMap<String, (String, String)>,
}

impl ConstructIds {
    fn allocate(&mut self, kind: &str, name: &str) -> String {
        let base = construct_id(kind, name);
        let mut id = base.clone();
        let mut n = 1;
        while let Some((owner_kind, owner_name)) = self.taken.get(&id) {
            if owner_kind == kind && owner_name == name {
                return id;
            }
            n += 1;
            id = format!("{}{}", base, n);
        }
        self.taken
            .insert(id.clone(), (kind.to_string(), name.to_string()));
        id
    }
}

/// `("Project", "myProject")` gives `ProjectMyProject`. Names with characters
/// a logical id cannot hold get a digest of the full name appended, so
/// `new-checkout` and `new.checkout` stay apart.
fn construct_id(kind: &str, name: &str) -> String {
    let kept: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    let mut chars = kept.chars();
    let mut id = match chars.next() {
        Some(first) => format!("{}{}{}", kind, first.to_ascii_uppercase(), chars.as_str()),
        None => kind.to_string(),
    };
    if kept.len() != name.len() || name.is_empty() {
        id.push_str(&name_digest(name));
    }
    id
}

fn name_digest(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hex::encode(hasher.finalize())[..8].to_string()
}
