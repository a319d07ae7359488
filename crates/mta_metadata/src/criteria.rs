//! Label selector criteria for querying deployed entities by metadata.
//!
//! Criteria are assembled through a small chain of immutable builders:
//!
//! ```text
//! MtaMetadataCriteriaBuilder --label(k)--> LabelBuilder --exists()/...--> FinalizingBuilder
//!          ^                                                                  |
//!          +----------------------------and()--------------------------------+
//! ```
//!
//! Every step validates its input and returns a new value, so a partially
//! built chain can be reused without affecting other chains derived from it.

use crate::criteria_validator::{validate_key, validate_value};
use crate::errors::CriteriaResult;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[cfg(test)]
#[path = "criteria_tests.rs"]
mod tests;

/// A single predicate on one label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabelCriterion {
    Exists { key: String },
    DoesNotExist { key: String },
    HasValue { key: String, value: String },
}

impl LabelCriterion {
    pub fn key(&self) -> &str {
        match self {
            Self::Exists { key } | Self::DoesNotExist { key } | Self::HasValue { key, .. } => key,
        }
    }

    /// Evaluate the predicate against a label map.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        match self {
            Self::Exists { key } => labels.contains_key(key),
            Self::DoesNotExist { key } => !labels.contains_key(key),
            Self::HasValue { key, value } => labels.get(key) == Some(value),
        }
    }
}

impl fmt::Display for LabelCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists { key } => f.write_str(key),
            Self::DoesNotExist { key } => write!(f, "!{key}"),
            Self::HasValue { key, value } => write!(f, "{key}={value}"),
        }
    }
}

/// Completed criteria, ready to be sent to the entity store.
///
/// # Examples
///
/// ```
/// use mta_metadata::MtaMetadataCriteriaBuilder;
///
/// let criteria = MtaMetadataCriteriaBuilder::builder()
///     .label("mta_id")?
///     .exists()
///     .and()
///     .label("mta_namespace")?
///     .does_not_exist()
///     .build();
///
/// assert_eq!(criteria.query(), "mta_id,!mta_namespace");
/// # Ok::<(), mta_metadata::CriteriaValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MtaMetadataCriteria {
    criteria: Vec<LabelCriterion>,
}

impl MtaMetadataCriteria {
    pub fn criteria(&self) -> &[LabelCriterion] {
        &self.criteria
    }

    /// The comma-joined label selector.
    pub fn query(&self) -> String {
        self.criteria
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether an entity carrying `labels` satisfies every criterion.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(labels))
    }
}

impl fmt::Display for MtaMetadataCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

/// Entry point of the criteria chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MtaMetadataCriteriaBuilder {
    criteria: Vec<LabelCriterion>,
}

impl MtaMetadataCriteriaBuilder {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Start a predicate on the label `key`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `key` is not a valid label key.
    pub fn label(&self, key: impl Into<String>) -> CriteriaResult<LabelBuilder> {
        let key = key.into();
        validate_key(&key)?;
        Ok(LabelBuilder {
            criteria: self.criteria.clone(),
            key,
        })
    }
}

/// A chain waiting for the predicate on its current label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBuilder {
    criteria: Vec<LabelCriterion>,
    key: String,
}

impl LabelBuilder {
    pub fn exists(&self) -> FinalizingBuilder {
        self.finish(LabelCriterion::Exists {
            key: self.key.clone(),
        })
    }

    pub fn does_not_exist(&self) -> FinalizingBuilder {
        self.finish(LabelCriterion::DoesNotExist {
            key: self.key.clone(),
        })
    }

    /// Require the label to carry exactly `value`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not a valid label value.
    pub fn has_value(&self, value: impl Into<String>) -> CriteriaResult<FinalizingBuilder> {
        let value = value.into();
        validate_value(&value)?;
        Ok(self.finish(LabelCriterion::HasValue {
            key: self.key.clone(),
            value,
        }))
    }

    /// Require `value` when it is non-blank, otherwise require the label to be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not a valid label value.
    pub fn has_value_or_isnt_present(
        &self,
        value: Option<&str>,
    ) -> CriteriaResult<FinalizingBuilder> {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.has_value(value),
            None => Ok(self.does_not_exist()),
        }
    }

    fn finish(&self, criterion: LabelCriterion) -> FinalizingBuilder {
        debug!(criterion = %criterion, "Adding label criterion");
        let mut criteria = self.criteria.clone();
        criteria.push(criterion);
        FinalizingBuilder { criteria }
    }
}

/// A chain whose last predicate is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizingBuilder {
    criteria: Vec<LabelCriterion>,
}

impl FinalizingBuilder {
    pub fn and(&self) -> MtaMetadataCriteriaBuilder {
        MtaMetadataCriteriaBuilder {
            criteria: self.criteria.clone(),
        }
    }

    pub fn build(&self) -> MtaMetadataCriteria {
        MtaMetadataCriteria {
            criteria: self.criteria.clone(),
        }
    }
}
