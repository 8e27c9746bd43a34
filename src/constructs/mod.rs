//! Constructs that validate Evidently props and register resource records.
//!
//! Each construct has two entry points:
//!
//! - `new(stack, id, props)`: checks cardinality, renders the `AWS::Evidently::*`
//!   record, registers it with the [`Stack`](crate::stack::Stack) and returns a
//!   handle whose ARN is a `Fn::GetAtt` token.
//! - `from_*_arn` / `from_*_attributes`: rehydrates a handle for a resource that
//!   already exists. Nothing is registered and no lookup is made; the name is
//!   the trailing segment of the ARN.

mod experiment;
mod feature;
mod launch;
mod project;

pub use experiment::*;
pub use feature::*;
pub use launch::*;
pub use project::*;

use crate::arn::Arn;
use crate::error::Result;

pub(crate) const SERVICE: &str = "evidently";

/// Name parts recovered from an imported ARN.
struct ImportedArn {
    /// Project segment, absent for ARNs that are not nested under a project.
    project: Option<String>,
    name: String,
}

fn parse_imported_arn(arn: &str) -> Result<ImportedArn> {
    let parsed = Arn::parse(arn)?;
    let name = parsed.resource_name()?.to_string();
    Ok(ImportedArn {
        project: parsed.segment("project").map(str::to_string),
        name,
    })
}
