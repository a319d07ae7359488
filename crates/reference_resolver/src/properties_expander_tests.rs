use super::*;
use serde_json::json;

fn properties(value: Value) -> Properties {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_reference_becomes_list() {
    let mut expander =
        PropertiesExpander::new("peers", vec!["peers.0".to_string(), "peers.1".to_string()]);

    let expanded = expander.expand(&properties(json!({
        "urls": "~{peers/url}",
        "name": "app"
    })));

    assert_eq!(
        Value::Object(expanded),
        json!({
            "urls": ["~{peers.0/url}", "~{peers.1/url}"],
            "name": "app"
        })
    );
    assert_eq!(expander.expanded_properties(), ["urls"]);
}

#[test]
fn test_no_expanded_dependencies_gives_empty_list() {
    let mut expander = PropertiesExpander::new("peers", Vec::new());

    let expanded = expander.expand(&properties(json!({"urls": "~{peers/url}"})));

    assert_eq!(Value::Object(expanded), json!({"urls": []}));
}

#[test]
fn test_nested_maps_are_expanded() {
    let mut expander = PropertiesExpander::new("peers", vec!["peers.0".to_string()]);

    let expanded = expander.expand(&properties(json!({
        "config": {"endpoint": "https://~{peers/host}/api", "retries": 3}
    })));

    assert_eq!(
        Value::Object(expanded),
        json!({"config": {"endpoint": ["https://~{peers.0/host}/api"], "retries": 3}})
    );
    assert_eq!(expander.expanded_properties(), ["config.endpoint"]);
}

#[test]
fn test_unrelated_references_are_untouched() {
    let mut expander = PropertiesExpander::new("peers", vec!["peers.0".to_string()]);
    let input = properties(json!({
        "a": "~{peers-other/url}",
        "b": "~{db/url}",
        "c": ["~{peers/url}"]
    }));

    let expanded = expander.expand(&input);

    assert_eq!(expanded, input);
    assert!(expander.expanded_properties().is_empty());
}
