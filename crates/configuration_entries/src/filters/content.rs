//! Structural content matching.

use crate::configuration_entry::parse_content_object;
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;

/// Whether `content` contains every key of `required` with an equal value.
///
/// Values are compared structurally. Keys present in the content but not
/// required are ignored. Empty or absent requirements always match; when
/// something is required, content that is absent or not a JSON object never
/// matches.
///
/// ```
/// use configuration_entries::filters::content;
/// use serde_json::json;
///
/// let required = json!({"plan": "small"});
/// let required = required.as_object();
///
/// assert!(content::matches(Some(r#"{"plan":"small","url":"x"}"#), required));
/// assert!(!content::matches(Some(r#"{"plan":"large"}"#), required));
/// assert!(!content::matches(None, required));
/// ```
pub fn matches(content: Option<&str>, required: Option<&Map<String, Value>>) -> bool {
    let Some(required) = required.filter(|required| !required.is_empty()) else {
        return true;
    };

    let Some(actual) = parse_content_object(content) else {
        return false;
    };

    required
        .iter()
        .all(|(key, expected)| actual.get(key) == Some(expected))
}
