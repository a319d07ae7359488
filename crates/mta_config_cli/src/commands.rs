//! Command modules for the `mta-config` CLI.
//!
//! - `criteria_cmd`: builds validated label selectors
//! - `resolve_cmd`: dry-run resolution of a descriptor against an entry snapshot

pub mod criteria_cmd;
pub mod resolve_cmd;
