//! Typed CloudFormation constructs for CloudWatch Evidently.
//!
//! Build [`models`] props, hand them to a [`constructs`] type together with a
//! [`Stack`], and render the stack as a template:
//!
//! ```
//! use evidently_constructs::constructs::{Feature, Project};
//! use evidently_constructs::models::{FeatureProps, ProjectProps, Variation};
//! use evidently_constructs::Stack;
//!
//! let mut stack = Stack::new("FlagsStack");
//! let project = Project::new(&mut stack, "Project", ProjectProps::new("myProject"))?;
//! let feature = Feature::new(
//!     &mut stack,
//!     "Feature",
//!     FeatureProps::new(
//!         "newFeature",
//!         &project,
//!         vec![Variation::string("defaultVariation", "foobar")],
//!     ),
//! )?;
//! assert_eq!(feature.name(), "newFeature");
//! let template = stack.to_template()?;
//! assert_eq!(template["Resources"]["Feature"]["Properties"]["Name"], "newFeature");
//! # Ok::<(), evidently_constructs::Error>(())
//! ```

pub mod app;
pub mod arn;
pub mod cfn;
pub mod constructs;
pub mod error;
pub mod models;
pub mod stack;
pub mod token;

pub use error::{Error, Result};
pub use stack::Stack;
pub use token::Token;
