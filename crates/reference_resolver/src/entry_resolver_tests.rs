//! Tests for single reference resolution.

use super::*;
use configuration_entries::InMemoryConfigurationEntryStore;
use serde_json::{json, Value};

fn reference() -> Resource {
    Resource::new("db-config")
        .with_type("configuration")
        .with_parameter("provider-id", json!("p1"))
        .with_parameter("version", json!("^1.0.0"))
        .with_parameter("service-name", json!("my-db"))
        .with_property("pool-size", json!(10))
}

fn entry(space: &str, content: &str) -> ConfigurationEntry {
    ConfigurationEntry::new("mta", "p1", CloudTarget::new("o1", space))
        .with_version("1.4.0".parse().unwrap())
        .with_content(content)
}

fn filter() -> ConfigurationFilter {
    ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_provider_version("^1.0.0")
        .with_target_space(CloudTarget::new("o1", "*"))
}

#[test]
fn test_single_entry_keeps_name_and_overlays_properties() {
    let entries = vec![entry("s1", r#"{"url":"https://db","pool-size":5}"#)];

    let resources = to_resources(&reference(), &entries);

    assert_eq!(resources.len(), 1);
    let resource = &resources[0];
    assert_eq!(resource.name, "db-config");
    assert_eq!(resource.resource_type, None);
    assert!(resource.active);
    assert_eq!(
        Value::Object(resource.properties.clone()),
        json!({"url": "https://db", "pool-size": 10})
    );
    assert_eq!(
        Value::Object(resource.parameters.clone()),
        json!({"service-name": "my-db"})
    );
}

#[test]
fn test_several_entries_are_indexed_in_order() {
    let entries = vec![
        entry("s1", r#"{"url":"https://a"}"#),
        entry("s2", r#"{"url":"https://b"}"#),
    ];

    let resources = to_resources(&reference(), &entries);

    let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["db-config.0", "db-config.1"]);
    assert_eq!(resources[1].properties["url"], json!("https://b"));
}

#[test]
fn test_non_object_content_contributes_nothing() {
    let entries = vec![entry("s1", "not json")];

    let resources = to_resources(&reference(), &entries);

    assert_eq!(
        Value::Object(resources[0].properties.clone()),
        json!({"pool-size": 10})
    );
}

#[tokio::test]
async fn test_resolve_against_store() {
    let store = InMemoryConfigurationEntryStore::with_entries(vec![
        entry("s1", r#"{"url":"https://a"}"#),
        entry("s2", r#"{"url":"https://b"}"#).with_visibility(vec![CloudTarget::new("o9", "*")]),
    ]);
    let resolver = ConfigurationReferenceResolver::new(&store, None);

    let matches = resolver
        .resolve(&reference(), &filter(), &CloudTarget::new("o1", "s3"))
        .await
        .unwrap();

    assert_eq!(matches.entries.len(), 1);
    assert_eq!(matches.entries[0].target_space, CloudTarget::new("o1", "s1"));
    assert_eq!(matches.resources.len(), 1);
    assert_eq!(matches.resources[0].properties["url"], json!("https://a"));
}

#[tokio::test]
async fn test_global_space_is_used_when_configured() {
    let global = CloudTarget::new("deploy-org", "global-config");
    let store = InMemoryConfigurationEntryStore::with_entries(vec![
        ConfigurationEntry::new("mta", "p1", global.clone())
            .with_version("1.0.0".parse().unwrap())
            .with_visibility(vec![CloudTarget::any()]),
    ]);
    let consumer = CloudTarget::new("o1", "s1");
    let non_strict = filter().with_target_space(consumer.clone());

    let without_global = ConfigurationReferenceResolver::new(&store, None);
    let with_global = ConfigurationReferenceResolver::new(&store, Some(global));

    assert!(without_global
        .find_entries(&non_strict, &consumer)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        with_global
            .find_entries(&non_strict, &consumer)
            .await
            .unwrap()
            .len(),
        1
    );
}
