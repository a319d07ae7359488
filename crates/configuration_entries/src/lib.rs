//! Published configuration entries and the queries run against them.
//!
//! A deployed application may publish part of its configuration (a "provided
//! dependency") so that other deployments can consume it. This crate models
//! those published entries, the consumer-side [`ConfigurationFilter`], the
//! individual matching filters, and the two-phase lookup that searches the
//! consumer's own target space before the shared global configuration space.

pub mod cloud_target;
pub mod configuration_entry;
pub mod configuration_filter;
pub mod errors;
pub mod filters;
pub mod lookup;
pub mod store;

pub use cloud_target::{CloudTarget, ANY_TARGET};
pub use configuration_entry::{
    compute_provider_id, provider_namespace_is_empty, ConfigurationEntry,
    DEFAULT_PROVIDER_NAMESPACE, PROVIDER_NID_MTA,
};
pub use configuration_filter::{ConfigurationFilter, MatchScope, MismatchReason};
pub use errors::{StoreError, StoreResult, TargetParseError};
pub use filters::VersionRange;
pub use lookup::{find_configuration_entries, find_in_global_configuration_space};
pub use store::{ConfigurationEntryStore, EntryQuery, InMemoryConfigurationEntryStore};
