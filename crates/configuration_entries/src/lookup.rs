//! Two-phase lookup of the entries matching a filter.
//!
//! Entries are first searched in the filter's own target space. When nothing
//! matches there, the filter is not strict about its target, and a global
//! configuration space is configured, the global space is searched as well.
//! Entries in the global space are shared by the deploy service operator and
//! never carry a namespace unless one is asked for explicitly.

use crate::cloud_target::CloudTarget;
use crate::configuration_entry::ConfigurationEntry;
use crate::configuration_filter::{ConfigurationFilter, MatchScope};
use crate::errors::StoreResult;
use crate::store::{ConfigurationEntryStore, EntryQuery};
use tracing::debug;

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;

/// Find the entries that match `filter` and are visible to `visibility_targets`.
///
/// # Errors
///
/// Store failures are returned unchanged.
pub async fn find_configuration_entries(
    store: &dyn ConfigurationEntryStore,
    filter: &ConfigurationFilter,
    visibility_targets: &[CloudTarget],
    global_config_target: Option<&CloudTarget>,
) -> StoreResult<Vec<ConfigurationEntry>> {
    debug!(
        filter = %filter,
        visibility_targets = ?visibility_targets,
        "Searching for configuration entries"
    );

    let query = EntryQuery {
        provider_nid: filter.provider_nid.clone(),
        provider_id: filter.provider_id.clone(),
        target_space: filter.target_space.clone(),
    };
    let candidates = store.find(&query).await?;
    let candidate_count = candidates.len();
    let found = filter.select(candidates, visibility_targets, MatchScope::requested(filter));

    debug!(
        candidates = candidate_count,
        matches = found.len(),
        "Searched requested target space"
    );
    if !found.is_empty() {
        return Ok(found);
    }

    let Some(global_config_target) = global_config_target else {
        return Ok(found);
    };
    if filter.strict_target_space {
        debug!("Filter is strict about its target space; skipping global configuration space");
        return Ok(found);
    }

    find_in_global_configuration_space(store, filter, visibility_targets, global_config_target)
        .await
}

/// Search only the global configuration space.
///
/// # Errors
///
/// Store failures are returned unchanged.
pub async fn find_in_global_configuration_space(
    store: &dyn ConfigurationEntryStore,
    filter: &ConfigurationFilter,
    visibility_targets: &[CloudTarget],
    global_config_target: &CloudTarget,
) -> StoreResult<Vec<ConfigurationEntry>> {
    debug!(
        global_config_target = %global_config_target,
        "Searching global configuration space"
    );

    let query = EntryQuery {
        provider_nid: filter.provider_nid.clone(),
        provider_id: filter.provider_id.clone(),
        target_space: Some(global_config_target.clone()),
    };
    let candidates = store.find(&query).await?;
    let found = filter.select(
        candidates,
        visibility_targets,
        MatchScope::global(global_config_target),
    );

    debug!(matches = found.len(), "Searched global configuration space");
    Ok(found)
}
