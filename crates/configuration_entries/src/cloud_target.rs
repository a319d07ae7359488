//! Deployment target addressing.
//!
//! A [`CloudTarget`] names an organization and a space on the platform. The
//! textual form used in descriptors and configuration files is
//! `"<org> <space>"`, separated by whitespace.

use crate::errors::TargetParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
#[path = "cloud_target_tests.rs"]
mod tests;

/// Component value that matches any organization or space.
pub const ANY_TARGET: &str = "*";

/// An (organization, space) pair.
///
/// Either component may be [`ANY_TARGET`] when the target is used to express
/// visibility or a requested target. The target an entry is published to is
/// always concrete.
///
/// # Examples
///
/// ```
/// use configuration_entries::CloudTarget;
///
/// let target: CloudTarget = "acme dev".parse()?;
/// assert_eq!(target, CloudTarget::new("acme", "dev"));
/// assert_eq!(target.to_string(), "acme dev");
///
/// let org_wide = CloudTarget::organization_wide("acme");
/// assert!(org_wide.is_space_wildcard());
/// # Ok::<(), configuration_entries::TargetParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CloudTarget {
    /// Organization name, or `*`.
    #[serde(rename = "org")]
    pub organization_name: String,

    /// Space name, or `*`.
    #[serde(rename = "space")]
    pub space_name: String,
}

impl CloudTarget {
    /// Create a target from its organization and space names.
    pub fn new(organization_name: impl Into<String>, space_name: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            space_name: space_name.into(),
        }
    }

    /// The target that matches every organization and space.
    pub fn any() -> Self {
        Self::new(ANY_TARGET, ANY_TARGET)
    }

    /// A target covering every space of one organization.
    pub fn organization_wide(organization_name: impl Into<String>) -> Self {
        Self::new(organization_name, ANY_TARGET)
    }

    /// Whether the organization component is the wildcard.
    pub fn is_org_wildcard(&self) -> bool {
        self.organization_name == ANY_TARGET
    }

    /// Whether the space component is the wildcard.
    pub fn is_space_wildcard(&self) -> bool {
        self.space_name == ANY_TARGET
    }
}

impl fmt::Display for CloudTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.organization_name, self.space_name)
    }
}

impl FromStr for CloudTarget {
    type Err = TargetParseError;

    /// Parse `"<org> <space>"`.
    ///
    /// Leading and trailing whitespace is ignored. Everything after the first
    /// run of whitespace is the space name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let Some((org, space)) = trimmed.split_once(char::is_whitespace) else {
            return Err(TargetParseError::MissingDelimiter {
                value: value.to_string(),
            });
        };

        let space = space.trim_start();
        if org.is_empty() {
            return Err(TargetParseError::EmptyPart {
                value: value.to_string(),
                part: "org",
            });
        }
        if space.is_empty() {
            return Err(TargetParseError::EmptyPart {
                value: value.to_string(),
                part: "space",
            });
        }

        Ok(Self::new(org, space))
    }
}
