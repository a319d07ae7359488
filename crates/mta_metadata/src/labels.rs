//! Metadata labels written on deployed MTA entities, and the selectors used
//! to find them again.
//!
//! Identifiers such as MTA ids and namespaces may contain characters that are
//! not allowed in label values, so the labels carry a hash of the identifier
//! while the readable value goes into an annotation.

use crate::criteria::{MtaMetadataCriteria, MtaMetadataCriteriaBuilder};
use crate::errors::{CriteriaResult, CriteriaValidationError, LabelField, LabelRule};
use sha2::{Digest, Sha224};

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

pub const MTA_ID: &str = "mta_id";
pub const MTA_NAMESPACE: &str = "mta_namespace";

/// Prefix of the annotations holding the readable identifiers.
pub const ANNOTATION_PREFIX: &str = "mta.cloudfoundry.org/";

/// Annotation key for `label`, e.g. `mta.cloudfoundry.org/mta_id`.
pub fn annotation_key(label: &str) -> String {
    format!("{ANNOTATION_PREFIX}{label}")
}

/// Hash an identifier into a valid label value.
///
/// The hex form of a SHA-224 digest is 56 characters long and purely
/// alphanumeric. Blank identifiers have no label value.
pub fn hashed_label_value(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(hex::encode(Sha224::digest(value.as_bytes())))
}

/// Every entity that belongs to some MTA.
pub fn all_deployed_mtas() -> CriteriaResult<MtaMetadataCriteria> {
    Ok(MtaMetadataCriteriaBuilder::builder()
        .label(MTA_ID)?
        .exists()
        .build())
}

/// Entities of MTAs deployed without a namespace.
pub fn deployed_mtas_without_namespace() -> CriteriaResult<MtaMetadataCriteria> {
    Ok(MtaMetadataCriteriaBuilder::builder()
        .label(MTA_ID)?
        .exists()
        .and()
        .label(MTA_NAMESPACE)?
        .does_not_exist()
        .build())
}

/// Entities of the MTA `mta_id`, in `namespace` or in no namespace when
/// `namespace` is blank.
///
/// # Errors
///
/// Returns [`CriteriaValidationError::InvalidLabel`] with
/// [`LabelRule::NotBlank`] when `mta_id` is blank.
pub fn deployed_mta(
    mta_id: &str,
    namespace: Option<&str>,
) -> CriteriaResult<MtaMetadataCriteria> {
    let hashed_id =
        hashed_label_value(mta_id).ok_or_else(|| CriteriaValidationError::InvalidLabel {
            field: LabelField::Value,
            rule: LabelRule::NotBlank,
            value: mta_id.to_string(),
        })?;
    let hashed_namespace = namespace.and_then(hashed_label_value);

    Ok(MtaMetadataCriteriaBuilder::builder()
        .label(MTA_ID)?
        .has_value(hashed_id)?
        .and()
        .label(MTA_NAMESPACE)?
        .has_value_or_isnt_present(hashed_namespace.as_deref())?
        .build())
}
