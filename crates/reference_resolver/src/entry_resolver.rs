//! Resolution of a single reference resource.

use crate::descriptor::{Properties, Resource};
use crate::errors::ResolutionResult;
use crate::filter_parser::CONFIGURATION_REFERENCE_PARAMETERS;
use configuration_entries::{
    find_configuration_entries, CloudTarget, ConfigurationEntry, ConfigurationEntryStore,
    ConfigurationFilter,
};
use tracing::{debug, info};

#[cfg(test)]
#[path = "entry_resolver_tests.rs"]
mod tests;

/// Separator between a reference name and the index of one of its matches.
pub const RESOURCE_INDEX_DELIMITER: &str = ".";

/// Finds the entries matching one reference and turns them into resources.
pub struct ConfigurationReferenceResolver<'a> {
    store: &'a dyn ConfigurationEntryStore,
    global_config_target: Option<CloudTarget>,
}

impl<'a> ConfigurationReferenceResolver<'a> {
    pub fn new(
        store: &'a dyn ConfigurationEntryStore,
        global_config_target: Option<CloudTarget>,
    ) -> Self {
        Self {
            store,
            global_config_target,
        }
    }

    /// Entries matching `filter` that `consumer_target` may see.
    ///
    /// # Errors
    ///
    /// Store failures are returned as [`crate::ResolutionError::Store`].
    pub async fn find_entries(
        &self,
        filter: &ConfigurationFilter,
        consumer_target: &CloudTarget,
    ) -> ResolutionResult<Vec<ConfigurationEntry>> {
        let visibility_targets = [consumer_target.clone()];
        let entries = find_configuration_entries(
            self.store,
            filter,
            &visibility_targets,
            self.global_config_target.as_ref(),
        )
        .await?;
        Ok(entries)
    }

    /// Resolve `resource` to one concrete resource per matching entry.
    ///
    /// # Errors
    ///
    /// Store failures are returned as [`crate::ResolutionError::Store`].
    pub async fn resolve(
        &self,
        resource: &Resource,
        filter: &ConfigurationFilter,
        consumer_target: &CloudTarget,
    ) -> ResolutionResult<ReferenceMatches> {
        let entries = self.find_entries(filter, consumer_target).await?;
        info!(
            resource = %resource.name,
            matches = entries.len(),
            "Resolved configuration reference"
        );
        let resources = to_resources(resource, &entries);
        Ok(ReferenceMatches { entries, resources })
    }
}

/// The entries a reference matched and the resources built from them, in
/// the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMatches {
    pub entries: Vec<ConfigurationEntry>,
    pub resources: Vec<Resource>,
}

/// Build the concrete resources standing in for `reference`.
///
/// A single entry keeps the reference's name. Several entries are named
/// `<name>.<index>` in entry order.
pub fn to_resources(reference: &Resource, entries: &[ConfigurationEntry]) -> Vec<Resource> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = indexed_name(&reference.name, index, entries.len());
            debug!(resource = %name, entry = %entry, "Creating resource from configuration entry");
            to_resource(reference, entry, name)
        })
        .collect()
}

fn to_resource(reference: &Resource, entry: &ConfigurationEntry, name: String) -> Resource {
    let mut properties: Properties = entry.content_map().unwrap_or_default();
    for (key, value) in &reference.properties {
        properties.insert(key.clone(), value.clone());
    }

    let parameters = reference
        .parameters
        .iter()
        .filter(|(key, _)| !CONFIGURATION_REFERENCE_PARAMETERS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Resource {
        name,
        resource_type: None,
        active: reference.active,
        parameters,
        properties,
        requires: reference.requires.clone(),
    }
}

fn indexed_name(name: &str, index: usize, count: usize) -> String {
    if count == 1 {
        name.to_string()
    } else {
        format!("{name}{RESOURCE_INDEX_DELIMITER}{index}")
    }
}
