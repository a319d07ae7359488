//! Error types for configuration entry lookup.
//!
//! Domain-specific errors raised while parsing deployment targets and while
//! querying the external configuration entry store.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by a [`ConfigurationEntryStore`](crate::ConfigurationEntryStore).
///
/// The resolution engine never retries these. A store implementation that
/// wants retries must perform them before surfacing an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Configuration entry store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Malformed configuration entry '{entry}': {reason}")]
    MalformedEntry { entry: String, reason: String },
}

/// Errors raised when a textual target expression cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("Target '{value}' does not contain 'org' and 'space' parts")]
    MissingDelimiter { value: String },

    #[error("Target '{value}' has an empty {part} part")]
    EmptyPart { value: String, part: &'static str },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
