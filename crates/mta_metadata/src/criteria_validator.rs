//! Label syntax validation.
//!
//! Label keys and values follow the platform's metadata rules: at most 63
//! characters, alphanumeric at both ends, and only alphanumerics, `-`, `_`
//! and `.` in between. A key may carry a DNS-style prefix (`example.com/key`)
//! of at most 253 characters.

use crate::errors::{CriteriaResult, CriteriaValidationError, LabelField, LabelRule};
use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "criteria_validator_tests.rs"]
mod tests;

/// Longest label name or value, in characters.
pub const MAX_LABEL_LENGTH: usize = 63;
/// Longest prefix of a `<prefix>/<name>` label key.
pub const MAX_PREFIX_LENGTH: usize = 253;

const LABEL_CHARACTERS: &str = "[A-Za-z0-9\\-_.]*";
const PREFIX_CHARACTERS: &str = "[A-Za-z0-9.\\-]+";

static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_.]*$").expect("label pattern is valid"));

static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+$").expect("prefix pattern is valid"));

/// Validate a label key, including an optional `prefix/` part.
///
/// # Errors
///
/// Returns [`CriteriaValidationError::InvalidLabel`] naming the first rule
/// the key, or its prefix, violates.
///
/// # Examples
///
/// ```
/// use mta_metadata::criteria_validator::validate_key;
///
/// assert!(validate_key("mta_id").is_ok());
/// assert!(validate_key("mta.cloudfoundry.org/mta_id").is_ok());
/// assert!(validate_key("Bad Key!").is_err());
/// ```
pub fn validate_key(key: &str) -> CriteriaResult<()> {
    if key.trim().is_empty() {
        return Err(invalid(LabelField::Key, LabelRule::NotBlank, key));
    }

    let name = match key.rfind('/') {
        Some(index) => {
            validate_prefix(&key[..=index])?;
            &key[index + 1..]
        }
        None => key,
    };

    if name.is_empty() {
        return Err(invalid(LabelField::Key, LabelRule::NotBlank, name));
    }
    validate_label_text(LabelField::Key, name)
}

/// Validate a label value. Blank values are allowed.
///
/// # Errors
///
/// Returns [`CriteriaValidationError::InvalidLabel`] for a non-blank value
/// that breaks the label syntax.
pub fn validate_value(value: &str) -> CriteriaResult<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_label_text(LabelField::Value, value)
}

/// Validate a key prefix, including its trailing `/`.
///
/// # Errors
///
/// Returns [`CriteriaValidationError::InvalidLabel`] with
/// [`LabelField::Prefix`].
pub fn validate_prefix(prefix: &str) -> CriteriaResult<()> {
    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(invalid(
            LabelField::Prefix,
            LabelRule::MaxLength(MAX_PREFIX_LENGTH),
            prefix,
        ));
    }
    if !prefix.contains('.') {
        return Err(invalid(LabelField::Prefix, LabelRule::ContainsDot, prefix));
    }
    let Some(domain) = prefix.strip_suffix('/') else {
        return Err(invalid(LabelField::Prefix, LabelRule::EndsWithSlash, prefix));
    };
    if !PREFIX_PATTERN.is_match(domain) {
        return Err(invalid(
            LabelField::Prefix,
            LabelRule::AllowedCharacters(PREFIX_CHARACTERS),
            prefix,
        ));
    }
    Ok(())
}

fn validate_label_text(field: LabelField, text: &str) -> CriteriaResult<()> {
    if text.chars().count() > MAX_LABEL_LENGTH {
        return Err(invalid(field, LabelRule::MaxLength(MAX_LABEL_LENGTH), text));
    }

    let starts_alphanumeric = text.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_alphanumeric = text.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_alphanumeric || !ends_alphanumeric {
        return Err(invalid(field, LabelRule::AlphanumericBoundaries, text));
    }

    if !LABEL_PATTERN.is_match(text) {
        return Err(invalid(
            field,
            LabelRule::AllowedCharacters(LABEL_CHARACTERS),
            text,
        ));
    }
    Ok(())
}

fn invalid(field: LabelField, rule: LabelRule, value: &str) -> CriteriaValidationError {
    CriteriaValidationError::InvalidLabel {
        field,
        rule,
        value: value.to_string(),
    }
}
