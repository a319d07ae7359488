//! Requested-target matching with `*` wildcards.

use crate::cloud_target::CloudTarget;

#[cfg(test)]
#[path = "target_wildcard_tests.rs"]
mod tests;

/// Check an entry's concrete target against a requested target.
///
/// Rules, first match wins:
/// 1. no requested target matches everything
/// 2. `* *` matches everything
/// 3. `* <space>` matches any organization with that space
/// 4. `<org> *` matches any space of that organization
/// 5. otherwise both components must be equal
///
/// ```
/// use configuration_entries::CloudTarget;
/// use configuration_entries::filters::target_wildcard;
///
/// let actual = CloudTarget::new("a", "b");
/// assert!(target_wildcard::matches(&actual, Some(&CloudTarget::new("*", "b"))));
/// assert!(!target_wildcard::matches(&actual, Some(&CloudTarget::new("x", "*"))));
/// ```
pub fn matches(actual: &CloudTarget, requested: Option<&CloudTarget>) -> bool {
    let Some(requested) = requested else {
        return true;
    };

    match (requested.is_org_wildcard(), requested.is_space_wildcard()) {
        (true, true) => true,
        (true, false) => actual.space_name == requested.space_name,
        (false, true) => actual.organization_name == requested.organization_name,
        (false, false) => actual == requested,
    }
}
