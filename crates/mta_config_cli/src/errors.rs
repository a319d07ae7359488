use std::io;

use mta_metadata::CriteriaValidationError;
use reference_resolver::ResolutionError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the `mta-config` CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to read an input file.
    #[error("Failed to load file '{path}': {source}")]
    LoadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An input file is not valid JSON of the expected shape.
    #[error("Failed to parse '{path}': {reason}")]
    ParseInput { path: String, reason: String },

    /// Resolution of the descriptor failed.
    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// A label criterion was rejected.
    #[error("Invalid criteria: {0}")]
    Criteria(#[from] CriteriaValidationError),

    /// Failed to render the command output.
    #[error("Failed to render output: {0}")]
    Output(String),
}
