//! Consumer-side queries over published configuration.
//!
//! A [`ConfigurationFilter`] captures what a consuming resource asked for:
//! who provides the configuration, which versions are acceptable, where it
//! must be published and what it must contain. Every absent field is a
//! wildcard.

use crate::cloud_target::CloudTarget;
use crate::configuration_entry::ConfigurationEntry;
use crate::filters::{content, namespace, target_wildcard, version, visibility, VersionRange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "configuration_filter_tests.rs"]
mod tests;

/// A consumer's requirement on published configuration.
///
/// # Examples
///
/// ```
/// use configuration_entries::{CloudTarget, ConfigurationEntry, ConfigurationFilter};
///
/// let entry = ConfigurationEntry::new("mta", "p1", CloudTarget::new("o1", "s1"))
///     .with_version("1.2.0".parse().unwrap())
///     .with_visibility(vec![CloudTarget::organization_wide("o1")]);
///
/// let filter = ConfigurationFilter::new()
///     .with_provider_id("p1")
///     .with_provider_version("^1.0.0");
///
/// assert!(filter.matches(&entry, &[CloudTarget::new("o1", "s2")]));
/// assert!(!filter.matches(&entry, &[CloudTarget::new("o2", "s2")]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_nid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// Version range expression, see [`VersionRange`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_namespace: Option<String>,

    /// Where the entry must be published. Components may be `*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_space: Option<CloudTarget>,

    /// Keys and values the entry content must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_content: Option<Map<String, Value>>,

    /// When set, no fallback to the global configuration space is attempted.
    #[serde(default)]
    pub strict_target_space: bool,
}

/// Which filter stage rejected an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    ProviderNid,
    ProviderId,
    TargetSpace,
    Visibility,
    Version,
    Content,
    Namespace,
}

impl MismatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderNid => "provider-nid",
            Self::ProviderId => "provider-id",
            Self::TargetSpace => "target-space",
            Self::Visibility => "visibility",
            Self::Version => "version",
            Self::Content => "content",
            Self::Namespace => "namespace",
        }
    }
}

/// Where a filter is evaluated.
///
/// The primary lookup uses the filter's own target; the global configuration
/// space fallback substitutes another target and treats an absent namespace
/// as "no namespace".
#[derive(Debug, Clone, Copy)]
pub struct MatchScope<'a> {
    pub target_space: Option<&'a CloudTarget>,
    pub absent_namespace_means_empty: bool,
}

impl<'a> MatchScope<'a> {
    /// Scope using the filter's own target space.
    pub fn requested(filter: &'a ConfigurationFilter) -> Self {
        Self {
            target_space: filter.target_space.as_ref(),
            absent_namespace_means_empty: false,
        }
    }

    /// Scope of the global configuration space fallback.
    pub fn global(global_config_target: &'a CloudTarget) -> Self {
        Self {
            target_space: Some(global_config_target),
            absent_namespace_means_empty: true,
        }
    }
}

impl ConfigurationFilter {
    /// A filter that matches every entry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider_nid(mut self, provider_nid: impl Into<String>) -> Self {
        self.provider_nid = Some(provider_nid.into());
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn with_provider_version(mut self, provider_version: impl Into<String>) -> Self {
        self.provider_version = Some(provider_version.into());
        self
    }

    pub fn with_provider_namespace(mut self, provider_namespace: impl Into<String>) -> Self {
        self.provider_namespace = Some(provider_namespace.into());
        self
    }

    pub fn with_target_space(mut self, target_space: CloudTarget) -> Self {
        self.target_space = Some(target_space);
        self
    }

    pub fn with_required_content(mut self, required_content: Map<String, Value>) -> Self {
        self.required_content = Some(required_content);
        self
    }

    pub fn with_strict_target_space(mut self, strict: bool) -> Self {
        self.strict_target_space = strict;
        self
    }

    /// Parse the version requirement.
    ///
    /// # Errors
    ///
    /// Returns the range parse error for a malformed expression.
    pub fn version_range(&self) -> Result<Option<VersionRange>, semver::Error> {
        self.provider_version
            .as_deref()
            .map(VersionRange::parse)
            .transpose()
    }

    /// Whether `entry` satisfies every part of the filter, as seen from
    /// `visibility_targets`.
    pub fn matches(&self, entry: &ConfigurationEntry, visibility_targets: &[CloudTarget]) -> bool {
        match self.version_range() {
            Ok(range) => self
                .mismatch(entry, visibility_targets, MatchScope::requested(self), range.as_ref())
                .is_none(),
            Err(_) => false,
        }
    }

    /// First filter stage that rejects `entry`, or `None` if it matches.
    ///
    /// Stages run in the order provider identity, target space, visibility,
    /// version, content, namespace.
    pub fn mismatch(
        &self,
        entry: &ConfigurationEntry,
        visibility_targets: &[CloudTarget],
        scope: MatchScope<'_>,
        range: Option<&VersionRange>,
    ) -> Option<MismatchReason> {
        if !option_matches(self.provider_nid.as_deref(), &entry.provider_nid) {
            return Some(MismatchReason::ProviderNid);
        }
        if !option_matches(self.provider_id.as_deref(), &entry.provider_id) {
            return Some(MismatchReason::ProviderId);
        }
        if !target_wildcard::matches(&entry.target_space, scope.target_space) {
            return Some(MismatchReason::TargetSpace);
        }
        if !visibility::is_visible(entry, visibility_targets) {
            return Some(MismatchReason::Visibility);
        }
        if !version::satisfies_range(entry, range) {
            return Some(MismatchReason::Version);
        }
        if !content::matches(entry.content.as_deref(), self.required_content.as_ref()) {
            return Some(MismatchReason::Content);
        }
        if !namespace::matches(
            entry.provider_namespace.as_deref(),
            self.provider_namespace.as_deref(),
            scope.absent_namespace_means_empty,
        ) {
            return Some(MismatchReason::Namespace);
        }
        None
    }

    /// Keep the entries that match, in their original order.
    ///
    /// A malformed version requirement selects nothing.
    pub fn select(
        &self,
        entries: Vec<ConfigurationEntry>,
        visibility_targets: &[CloudTarget],
        scope: MatchScope<'_>,
    ) -> Vec<ConfigurationEntry> {
        let range = match self.version_range() {
            Ok(range) => range,
            Err(error) => {
                warn!(
                    filter = %self,
                    error = %error,
                    "Version requirement cannot be parsed; no entry can match"
                );
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| {
                match self.mismatch(entry, visibility_targets, scope, range.as_ref()) {
                    None => true,
                    Some(reason) => {
                        debug!(
                            entry = %entry,
                            reason = reason.as_str(),
                            "Configuration entry rejected"
                        );
                        false
                    }
                }
            })
            .collect()
    }
}

impl fmt::Display for ConfigurationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(nid) = &self.provider_nid {
            parts.push(format!("provider-nid={nid}"));
        }
        if let Some(id) = &self.provider_id {
            parts.push(format!("provider-id={id}"));
        }
        if let Some(version) = &self.provider_version {
            parts.push(format!("version={version}"));
        }
        if let Some(namespace) = &self.provider_namespace {
            parts.push(format!("provider-namespace={namespace}"));
        }
        if let Some(target) = &self.target_space {
            parts.push(format!("target='{target}'"));
        }
        if let Some(content) = &self.required_content {
            parts.push(format!("content={}", Value::Object(content.clone())));
        }
        if parts.is_empty() {
            return f.write_str("<any>");
        }
        f.write_str(&parts.join(", "))
    }
}

fn option_matches(requested: Option<&str>, actual: &str) -> bool {
    requested.map_or(true, |requested| requested == actual)
}
