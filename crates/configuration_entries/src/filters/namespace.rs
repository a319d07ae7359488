//! Provider namespace matching.

use crate::configuration_entry::provider_namespace_is_empty;

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;

/// Whether an entry's namespace satisfies the requested one.
///
/// - a requested namespace that means "no namespace" (see
///   [`provider_namespace_is_empty`]) only matches entries without one
/// - an absent request otherwise matches any namespace
/// - a concrete request requires equality
pub fn matches(
    entry_namespace: Option<&str>,
    requested: Option<&str>,
    absent_means_empty: bool,
) -> bool {
    if provider_namespace_is_empty(requested, absent_means_empty) {
        return entry_namespace.is_none();
    }

    match requested {
        None => true,
        Some(requested) => entry_namespace == Some(requested),
    }
}
