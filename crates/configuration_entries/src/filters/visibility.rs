//! Entry visibility checks.
//!
//! An entry lists the targets allowed to consume it. A consumer deploying to
//! some target may only see entries whose visibility covers that target.

use super::target_wildcard;
use crate::cloud_target::CloudTarget;
use crate::configuration_entry::ConfigurationEntry;

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;

/// Whether `entry` is visible to any of `requesting_targets`.
///
/// An empty list of requesting targets is an unrestricted caller and sees
/// everything.
pub fn is_visible(entry: &ConfigurationEntry, requesting_targets: &[CloudTarget]) -> bool {
    if requesting_targets.is_empty() {
        return true;
    }

    let visibility = entry.effective_visibility();
    requesting_targets.iter().any(|requesting| {
        visibility
            .iter()
            .any(|visibility_target| covers(visibility_target, requesting))
    })
}

/// Whether a single visibility target admits a requesting target.
///
/// The visibility target plays the role of the requested (possibly wildcard)
/// side of [`target_wildcard::matches`].
pub fn covers(visibility_target: &CloudTarget, requesting_target: &CloudTarget) -> bool {
    target_wildcard::matches(requesting_target, Some(visibility_target))
}
