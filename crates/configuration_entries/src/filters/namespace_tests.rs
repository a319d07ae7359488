use super::*;

#[test]
fn test_absent_request_matches_any_namespace() {
    assert!(matches(None, None, false));
    assert!(matches(Some("blue"), None, false));
}

#[test]
fn test_absent_request_can_mean_no_namespace() {
    assert!(matches(None, None, true));
    assert!(!matches(Some("blue"), None, true));
}

#[test]
fn test_default_namespace_means_no_namespace() {
    assert!(matches(None, Some("default"), false));
    assert!(!matches(Some("blue"), Some("default"), false));
}

#[test]
fn test_concrete_namespace_requires_equality() {
    assert!(matches(Some("blue"), Some("blue"), false));
    assert!(!matches(Some("green"), Some("blue"), false));
    assert!(!matches(None, Some("blue"), true));
}
