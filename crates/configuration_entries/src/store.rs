//! Access to published configuration entries.
//!
//! The store is an external collaborator (typically a database table). The
//! resolution engine only asks it for a coarse superset of candidates and
//! performs all fine-grained matching in process.

use crate::cloud_target::CloudTarget;
use crate::configuration_entry::ConfigurationEntry;
use crate::errors::{StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::RwLock;
use tracing::debug;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Coarse query sent to a [`ConfigurationEntryStore`].
///
/// Absent fields are not restricted. Wildcard components of the target hint
/// are not restricted either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub provider_nid: Option<String>,
    pub provider_id: Option<String>,
    pub target_space: Option<CloudTarget>,
}

impl EntryQuery {
    /// Whether `entry` passes the coarse restrictions of this query.
    ///
    /// Store implementations may use this directly or translate the same
    /// restrictions into their own query language.
    pub fn admits(&self, entry: &ConfigurationEntry) -> bool {
        if let Some(nid) = &self.provider_nid {
            if &entry.provider_nid != nid {
                return false;
            }
        }
        if let Some(id) = &self.provider_id {
            if &entry.provider_id != id {
                return false;
            }
        }
        if let Some(target) = &self.target_space {
            if !target.is_org_wildcard()
                && !target.organization_name.is_empty()
                && entry.target_space.organization_name != target.organization_name
            {
                return false;
            }
            if !target.is_space_wildcard()
                && !target.space_name.is_empty()
                && entry.target_space.space_name != target.space_name
            {
                return false;
            }
        }
        true
    }
}

/// Source of published configuration entries.
///
/// # Errors
///
/// Implementations report infrastructure failures as
/// [`StoreError::Unavailable`]. They are propagated to the caller unchanged.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; several deployments may resolve
/// against the same store concurrently.
#[async_trait]
pub trait ConfigurationEntryStore: Send + Sync {
    /// Return every entry admitted by `query`.
    ///
    /// The result may be a superset of what the query describes, but must not
    /// omit any admitted entry.
    async fn find(&self, query: &EntryQuery) -> StoreResult<Vec<ConfigurationEntry>>;
}

/// A store holding entries in memory, in publication order.
///
/// Used for dry runs against a snapshot of the real store, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryConfigurationEntryStore {
    entries: RwLock<Vec<ConfigurationEntry>>,
}

impl InMemoryConfigurationEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ConfigurationEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Publish an entry, assigning the next free ID when it has none.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MalformedEntry`] if the entry has content that is not
    ///   a JSON object
    /// - [`StoreError::Unavailable`] if the store lock is poisoned
    pub fn publish(&self, mut entry: ConfigurationEntry) -> StoreResult<u64> {
        if entry.content.is_some() && entry.content_map().is_none() {
            return Err(StoreError::MalformedEntry {
                entry: entry.to_string(),
                reason: "content is not a JSON object".to_string(),
            });
        }

        let mut entries = self.entries.write().map_err(|_| StoreError::Unavailable {
            reason: "entry store lock poisoned".to_string(),
        })?;

        let id = match entry.id {
            Some(id) => id,
            None => entries.iter().filter_map(|e| e.id).max().map_or(1, |max| max + 1),
        };
        entry.id = Some(id);
        debug!(id = id, entry = %entry, "Publishing configuration entry");
        entries.push(entry);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConfigurationEntryStore for InMemoryConfigurationEntryStore {
    async fn find(&self, query: &EntryQuery) -> StoreResult<Vec<ConfigurationEntry>> {
        let entries = self.entries.read().map_err(|_| StoreError::Unavailable {
            reason: "entry store lock poisoned".to_string(),
        })?;

        Ok(entries
            .iter()
            .filter(|entry| query.admits(entry))
            .cloned()
            .collect())
    }
}
