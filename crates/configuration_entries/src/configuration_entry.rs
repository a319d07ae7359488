//! Published configuration entries.
//!
//! A [`ConfigurationEntry`] is one piece of configuration that a deployed MTA
//! published for others to consume: a provided dependency, a service binding,
//! an endpoint. Entries are created by the owning deployment and removed when
//! that deployment is undeployed or superseded; consumers only ever read them.

use crate::cloud_target::CloudTarget;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

#[cfg(test)]
#[path = "configuration_entry_tests.rs"]
mod tests;

/// Provider namespace ID used for entries published by MTA deployments.
pub const PROVIDER_NID_MTA: &str = "mta";

/// Namespace value that stands for "no namespace".
pub const DEFAULT_PROVIDER_NAMESPACE: &str = "default";

const PROVIDER_ID_DELIMITER: &str = ":";

/// Compute the provider ID of a dependency provided by an MTA.
///
/// ```
/// use configuration_entries::compute_provider_id;
///
/// assert_eq!(compute_provider_id("com.acme.shop", "db-config"), "com.acme.shop:db-config");
/// ```
pub fn compute_provider_id(mta_id: &str, provided_dependency_name: &str) -> String {
    format!("{mta_id}{PROVIDER_ID_DELIMITER}{provided_dependency_name}")
}

/// Whether a namespace value means "no namespace".
///
/// [`DEFAULT_PROVIDER_NAMESPACE`] always means no namespace. An absent value
/// only does when `absent_means_empty` is set; otherwise it means "any
/// namespace".
pub fn provider_namespace_is_empty(namespace: Option<&str>, absent_means_empty: bool) -> bool {
    match namespace {
        None => absent_means_empty,
        Some(value) => value == DEFAULT_PROVIDER_NAMESPACE,
    }
}

/// One published piece of configuration.
///
/// # Examples
///
/// ```
/// use configuration_entries::{CloudTarget, ConfigurationEntry};
///
/// let entry = ConfigurationEntry::new("mta", "com.acme.shop:db", CloudTarget::new("acme", "prod"))
///     .with_version("1.2.0".parse().unwrap())
///     .with_content(r#"{"url":"postgres://db"}"#);
///
/// // Without explicit visibility the whole owning organization may consume it.
/// assert_eq!(
///     entry.effective_visibility().as_ref(),
///     &[CloudTarget::organization_wide("acme")]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEntry {
    /// Store identifier, when the entry has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub provider_nid: String,

    pub provider_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_version: Option<Version>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_namespace: Option<String>,

    /// The concrete space the entry was published to.
    pub target_space: CloudTarget,

    /// Raw JSON content. Expected to be an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Targets allowed to consume the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<CloudTarget>>,

    /// Platform GUID of the publishing space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

impl ConfigurationEntry {
    /// Create an unversioned entry without content or explicit visibility.
    pub fn new(
        provider_nid: impl Into<String>,
        provider_id: impl Into<String>,
        target_space: CloudTarget,
    ) -> Self {
        Self {
            id: None,
            provider_nid: provider_nid.into(),
            provider_id: provider_id.into(),
            provider_version: None,
            provider_namespace: None,
            target_space,
            content: None,
            visibility: None,
            space_id: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.provider_version = Some(version);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.provider_namespace = Some(namespace.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Vec<CloudTarget>) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.space_id = Some(space_id.into());
        self
    }

    /// Visibility targets, falling back to the owning organization.
    pub fn effective_visibility(&self) -> Cow<'_, [CloudTarget]> {
        match &self.visibility {
            Some(targets) => Cow::Borrowed(targets.as_slice()),
            None => Cow::Owned(vec![CloudTarget::organization_wide(
                self.target_space.organization_name.clone(),
            )]),
        }
    }

    /// Parse the content as a JSON object.
    ///
    /// Returns `None` when there is no content or it is not a JSON object.
    pub fn content_map(&self) -> Option<Map<String, Value>> {
        parse_content_object(self.content.as_deref())
    }
}

impl fmt::Display for ConfigurationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_nid, self.provider_id)?;
        if let Some(version) = &self.provider_version {
            write!(f, "@{version}")?;
        }
        if let Some(namespace) = &self.provider_namespace {
            write!(f, " [{namespace}]")?;
        }
        write!(f, " in '{}'", self.target_space)
    }
}

pub(crate) fn parse_content_object(content: Option<&str>) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content?) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
