//! MTA metadata labels and label selector criteria.
//!
//! Deployed entities are labelled with the MTA they belong to. The criteria
//! built here select those entities from an external entity store; all label
//! keys and values are validated before a selector is produced.

pub mod criteria;
pub mod criteria_validator;
pub mod errors;
pub mod labels;

pub use criteria::{
    FinalizingBuilder, LabelBuilder, LabelCriterion, MtaMetadataCriteria,
    MtaMetadataCriteriaBuilder,
};
pub use errors::{CriteriaResult, CriteriaValidationError, LabelField, LabelRule};
pub use labels::hashed_label_value;
