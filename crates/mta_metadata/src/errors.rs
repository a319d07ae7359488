//! Metadata criteria error types.

use std::fmt;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// The part of a label that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Key,
    Value,
    Prefix,
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Key => "key",
            Self::Value => "value",
            Self::Prefix => "prefix",
        };
        f.write_str(name)
    }
}

/// A label syntax rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    NotBlank,
    MaxLength(usize),
    AlphanumericBoundaries,
    AllowedCharacters(&'static str),
    ContainsDot,
    EndsWithSlash,
}

impl fmt::Display for LabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBlank => f.write_str("must not be blank"),
            Self::MaxLength(max) => write!(f, "must be at most {max} characters long"),
            Self::AlphanumericBoundaries => {
                f.write_str("must start and end with an alphanumeric character")
            }
            Self::AllowedCharacters(pattern) => {
                write!(f, "must only contain characters matching {pattern}")
            }
            Self::ContainsDot => f.write_str("must contain a '.'"),
            Self::EndsWithSlash => f.write_str("must end with '/'"),
        }
    }
}

/// Errors raised while building metadata criteria.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaValidationError {
    #[error("Invalid label {field}: {rule}, but was '{value}'")]
    InvalidLabel {
        field: LabelField,
        rule: LabelRule,
        value: String,
    },
}

impl CriteriaValidationError {
    pub fn field(&self) -> LabelField {
        match self {
            Self::InvalidLabel { field, .. } => *field,
        }
    }

    pub fn rule(&self) -> LabelRule {
        match self {
            Self::InvalidLabel { rule, .. } => *rule,
        }
    }
}

/// Result type alias for criteria construction.
pub type CriteriaResult<T> = Result<T, CriteriaValidationError>;
