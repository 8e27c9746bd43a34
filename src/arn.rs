//! ARN parsing for resource import.
//!
//! Evidently resources are addressed as
//! `arn:<partition>:evidently:<region>:<account>:project/<project>[/<kind>/<name>]`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    /// Everything after the fifth colon, e.g. `project/p/feature/f`.
    pub resource: String,
}

impl Arn {
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(6, ':');
        let prefix = parts.next().unwrap_or_default();
        if prefix != "arn" {
            return Err(Error::InvalidArn(format!("'{}' does not start with 'arn:'", s)));
        }

        let mut field = |what: &str| {
            parts
                .next()
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidArn(format!("'{}' is missing the {}", s, what)))
        };
        let partition = field("partition")?;
        let service = field("service")?;
        let region = field("region")?;
        let account = field("account")?;
        let resource = field("resource")?;

        if partition.is_empty() || service.is_empty() || resource.is_empty() {
            return Err(Error::InvalidArn(format!(
                "'{}' has an empty partition, service or resource",
                s
            )));
        }

        Ok(Self {
            partition,
            service,
            region,
            account,
            resource,
        })
    }

    /// The trailing segment of the resource path, i.e. the short name of the
    /// resource (`project/p/feature/f` gives `f`).
    pub fn resource_name(&self) -> Result<&str> {
        self.resource
            .rsplit(['/', ':'])
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidArn(format!("'{}' has no resource name", self)))
    }

    /// Look up the path segment that follows `kind`, e.g. `segment("project")`.
    pub fn segment(&self, kind: &str) -> Option<&str> {
        let mut parts = self.resource.split('/');
        while let Some(part) = parts.next() {
            if part == kind {
                return parts.next().filter(|name| !name.is_empty());
            }
        }
        None
    }
}

impl FromStr for Arn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account, self.resource
        )
    }
}
