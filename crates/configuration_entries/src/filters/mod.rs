//! Predicates used to narrow a set of candidate configuration entries.
//!
//! Each filter is independent and treats an absent requirement as "matches
//! everything". [`ConfigurationFilter::matches`](crate::ConfigurationFilter::matches)
//! composes them in the order target, visibility, version, content, namespace.

pub mod content;
pub mod namespace;
pub mod target_wildcard;
pub mod version;
pub mod visibility;

pub use version::VersionRange;
