//! Values that end up in a rendered template.
//!
//! A created resource does not know its own ARN until CloudFormation deploys
//! it, so handles expose the ARN as an intrinsic function instead of a string.
//! Imported resources already carry a concrete ARN and use [`Token::Literal`].

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    /// `{"Fn::GetAtt": [logical_id, attribute]}`
    GetAtt {
        logical_id: String,
        attribute: String,
    },
}

impl Token {
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    /// The concrete string value, if this token is already resolved.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if the value is only known after deployment.
    pub fn is_unresolved(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::GetAtt {
                logical_id,
                attribute,
            } => write!(f, "${{Token[{}.{}]}}", logical_id, attribute),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(s) => serializer.serialize_str(s),
            Self::GetAtt {
                logical_id,
                attribute,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[logical_id, attribute])?;
                map.end()
            }
        }
    }
}
