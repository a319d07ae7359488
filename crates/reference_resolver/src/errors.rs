//! Resolution error types.

use configuration_entries::StoreError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort the resolution of a deployment descriptor.
///
/// None of these are transient: they describe a problem in the descriptor,
/// the published configuration, or the resolver setup. A failed resolution
/// never yields a partially rewritten descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("No configuration entries were found matching the filter specified in resource \"{resource}\"")]
    UnresolvedReference { resource: String },

    #[error("Multiple configuration entries were found matching the filter specified in resource \"{resource}\": {candidates:?}")]
    AmbiguousReference {
        resource: String,
        candidates: Vec<String>,
    },

    #[error("Invalid parameter \"{parameter}\" in resource \"{resource}\": {reason}")]
    InvalidReferenceParameter {
        resource: String,
        parameter: String,
        reason: String,
    },

    #[error("Configuration entry store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid resolver settings: {reason}")]
    Settings { reason: String },
}

impl ResolutionError {
    /// Name of the descriptor resource the error is about, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Self::UnresolvedReference { resource }
            | Self::AmbiguousReference { resource, .. }
            | Self::InvalidReferenceParameter { resource, .. } => Some(resource),
            Self::Store(_) | Self::Settings { .. } => None,
        }
    }
}

/// Result type alias for resolution operations.
pub type ResolutionResult<T> = Result<T, ResolutionError>;
