use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Variation;
use crate::constructs::{Feature, Project};
use crate::token::Token;

/// Reference to the project that owns a feature, experiment or launch.
///
/// Built from a [`Project`] handle (renders the project ARN) or from a plain
/// project name or ARN string (rendered as given).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef(Token);

impl ProjectRef {
    pub fn token(&self) -> &Token {
        &self.0
    }

    /// The string this reference was built from, if it came from a string.
    pub fn as_literal(&self) -> Option<&str> {
        self.0.as_literal()
    }
}

impl From<&Project> for ProjectRef {
    fn from(project: &Project) -> Self {
        Self(project.arn().clone())
    }
}

impl From<&str> for ProjectRef {
    fn from(s: &str) -> Self {
        Self(Token::from(s))
    }
}

impl From<String> for ProjectRef {
    fn from(s: String) -> Self {
        Self(Token::from(s))
    }
}

/// Reference to a feature by name.
///
/// A [`Feature`] handle and a bare name string normalize to the same value.
/// Nothing checks that the named feature exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureRef(String);

impl FeatureRef {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&Feature> for FeatureRef {
    fn from(feature: &Feature) -> Self {
        Self(feature.name().to_string())
    }
}

impl From<&str> for FeatureRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FeatureRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reference to a variation by name.
///
/// An unnamed [`Variation`] resolves to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariationRef(String);

impl VariationRef {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&Variation> for VariationRef {
    fn from(variation: &Variation) -> Self {
        Self(variation.name().to_string())
    }
}

impl From<&str> for VariationRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VariationRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// All three references are plain strings in config files.
macro_rules! string_ref_serde {
    ($ty:ident, $doc:literal) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }

        impl JsonSchema for $ty {
            fn schema_name() -> Cow<'static, str> {
                stringify!($ty).into()
            }

            fn json_schema(generator: &mut SchemaGenerator) -> Schema {
                let mut schema = String::json_schema(generator);
                schema.insert("description".to_string(), $doc.into());
                schema
            }
        }
    };
}

string_ref_serde!(ProjectRef, "Project name or ARN");
string_ref_serde!(FeatureRef, "Feature name");
string_ref_serde!(VariationRef, "Variation name");

impl Serialize for ProjectRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl Serialize for FeatureRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl Serialize for VariationRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
