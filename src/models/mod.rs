//! Configuration value objects for Evidently constructs.
//!
//! # Core Concepts
//!
//! ## Aggregates
//!
//! Each aggregate's props are rendered by one construct into one resource record:
//!
//! - [`ProjectProps`]: Top-level container, optionally delivering evaluation events
//!   to a log group or S3 bucket.
//! - [`FeatureProps`]: A flag with one or more typed [`Variation`]s.
//! - [`ExperimentProps`]: An A/B test comparing treatments against metric goals.
//! - [`LaunchProps`]: A scheduled rollout splitting traffic across launch groups.
//!
//! ## References
//!
//! Aggregates refer to each other by name or ARN only, never by ownership.
//! [`ProjectRef`], [`FeatureRef`] and [`VariationRef`] accept either a handle
//! or a bare string and normalize to the rendered value immediately.
//!
//! All props also deserialize from the camelCase JSON used by app config files.

mod experiment;
mod feature;
mod launch;
mod project;
mod reference;
mod variation;

pub use experiment::*;
pub use feature::*;
pub use launch::*;
pub use project::*;
pub use reference::*;
pub use variation::*;
