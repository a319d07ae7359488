//! Tests for configuration entry error types.

use super::*;

#[test]
fn test_store_unavailable_message() {
    let error = StoreError::Unavailable {
        reason: "connection refused".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Configuration entry store unavailable: connection refused"
    );
}

#[test]
fn test_malformed_entry_message_names_entry() {
    let error = StoreError::MalformedEntry {
        entry: "mta:app-db".to_string(),
        reason: "invalid version '1.x.y'".to_string(),
    };

    let message = error.to_string();
    assert!(message.contains("mta:app-db"));
    assert!(message.contains("invalid version"));
}

#[test]
fn test_target_parse_error_missing_delimiter() {
    let error = TargetParseError::MissingDelimiter {
        value: "*".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Target '*' does not contain 'org' and 'space' parts"
    );
}

#[test]
fn test_target_parse_error_empty_part() {
    let error = TargetParseError::EmptyPart {
        value: " dev".to_string(),
        part: "org",
    };

    match error {
        TargetParseError::EmptyPart { part, .. } => assert_eq!(part, "org"),
        _ => panic!("Expected EmptyPart"),
    }
}
