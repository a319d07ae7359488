//! Integration testing library for configuration reference resolution.
//!
//! Provides fixtures for published entries and deployment descriptors, plus
//! helpers shared by the scenario tests under `tests/`.

pub mod fixtures;
pub mod utils;

pub use utils::{init_logging, resolve_in, CountingStore};
