use super::*;
use crate::criteria_validator::validate_value;
use std::collections::HashMap;

#[test]
fn test_hashed_value_is_a_valid_label_value() {
    let hashed = hashed_label_value("com.example.my-app").unwrap();

    assert_eq!(hashed.len(), 56);
    assert!(validate_value(&hashed).is_ok());
    assert_eq!(hashed_label_value("com.example.my-app").unwrap(), hashed);
    assert_ne!(hashed_label_value("com.example.other").unwrap(), hashed);
}

#[test]
fn test_blank_value_has_no_hash() {
    assert_eq!(hashed_label_value(""), None);
    assert_eq!(hashed_label_value("  "), None);
}

#[test]
fn test_known_digest() {
    assert_eq!(
        hashed_label_value("abc").unwrap(),
        "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
    );
}

#[test]
fn test_annotation_key() {
    assert_eq!(annotation_key(MTA_ID), "mta.cloudfoundry.org/mta_id");
}

#[test]
fn test_deployed_mta_selectors() {
    assert_eq!(all_deployed_mtas().unwrap().query(), "mta_id");
    assert_eq!(
        deployed_mtas_without_namespace().unwrap().query(),
        "mta_id,!mta_namespace"
    );

    let hashed_id = hashed_label_value("my-app").unwrap();
    let hashed_namespace = hashed_label_value("blue").unwrap();

    assert_eq!(
        deployed_mta("my-app", None).unwrap().query(),
        format!("mta_id={hashed_id},!mta_namespace")
    );
    assert_eq!(
        deployed_mta("my-app", Some("blue")).unwrap().query(),
        format!("mta_id={hashed_id},mta_namespace={hashed_namespace}")
    );
}

#[test]
fn test_deployed_mta_selector_matches_labelled_entity() {
    let mut labels = HashMap::new();
    labels.insert(MTA_ID.to_string(), hashed_label_value("my-app").unwrap());

    assert!(deployed_mta("my-app", None).unwrap().matches(&labels));
    assert!(!deployed_mta("my-app", Some("blue")).unwrap().matches(&labels));
    assert!(!deployed_mta("other-app", None).unwrap().matches(&labels));
}

#[test]
fn test_deployed_mta_requires_an_id() {
    let error = deployed_mta("  ", None).unwrap_err();

    assert_eq!(error.field(), LabelField::Value);
    assert_eq!(error.rule(), LabelRule::NotBlank);
    assert!(deployed_mta("", Some("blue")).is_err());
}
