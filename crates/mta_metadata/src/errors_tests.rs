use super::*;

#[test]
fn test_message_names_field_rule_and_value() {
    let error = CriteriaValidationError::InvalidLabel {
        field: LabelField::Key,
        rule: LabelRule::MaxLength(63),
        value: "k".repeat(64),
    };

    let message = error.to_string();
    assert!(message.starts_with("Invalid label key: must be at most 63 characters long"));
    assert!(message.ends_with(&format!("'{}'", "k".repeat(64))));
}

#[test]
fn test_prefix_rule_messages() {
    let error = CriteriaValidationError::InvalidLabel {
        field: LabelField::Prefix,
        rule: LabelRule::EndsWithSlash,
        value: "example.com".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid label prefix: must end with '/', but was 'example.com'"
    );
    assert_eq!(error.field(), LabelField::Prefix);
    assert_eq!(error.rule(), LabelRule::EndsWithSlash);
}
