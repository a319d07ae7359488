//! Tests for configuration filter evaluation.

use super::*;
use serde_json::json;

fn published_entry() -> ConfigurationEntry {
    ConfigurationEntry::new("mta", "p1", CloudTarget::new("o1", "s1"))
        .with_version("1.2.0".parse().unwrap())
        .with_visibility(vec![CloudTarget::organization_wide("o1")])
        .with_content(r#"{"plan":"small","url":"https://p1"}"#)
}

fn consumer() -> [CloudTarget; 1] {
    [CloudTarget::new("o1", "s2")]
}

#[test]
fn test_empty_filter_matches_everything_visible() {
    let filter = ConfigurationFilter::new();

    assert!(filter.matches(&published_entry(), &consumer()));
    assert!(filter.matches(&published_entry(), &[]));
}

#[test]
fn test_scenario_single_match() {
    let filter = ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_provider_version("^1.0.0")
        .with_target_space(CloudTarget::new("o1", "*"));

    assert!(filter.matches(&published_entry(), &consumer()));
}

#[test]
fn test_version_mismatch_is_reported() {
    let filter = ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_provider_version("^2.0.0");

    let range = filter.version_range().unwrap();
    let reason = filter.mismatch(
        &published_entry(),
        &consumer(),
        MatchScope::requested(&filter),
        range.as_ref(),
    );

    assert_eq!(reason, Some(MismatchReason::Version));
}

#[test]
fn test_stage_order_reports_first_failure() {
    // Wrong id, wrong version and wrong content: identity is checked first.
    let filter = ConfigurationFilter::new()
        .with_provider_id("other")
        .with_provider_version("^9.0.0")
        .with_required_content(json!({"plan": "large"}).as_object().unwrap().clone());

    let range = filter.version_range().unwrap();
    let reason = filter.mismatch(
        &published_entry(),
        &consumer(),
        MatchScope::requested(&filter),
        range.as_ref(),
    );

    assert_eq!(reason, Some(MismatchReason::ProviderId));
}

#[test]
fn test_target_space_wildcards_apply() {
    let entry = published_entry();

    let same_space = ConfigurationFilter::new().with_target_space(CloudTarget::new("*", "s1"));
    let other_org = ConfigurationFilter::new().with_target_space(CloudTarget::new("o2", "*"));

    assert!(same_space.matches(&entry, &consumer()));
    assert!(!other_org.matches(&entry, &consumer()));
}

#[test]
fn test_invisible_entry_is_rejected() {
    let filter = ConfigurationFilter::new().with_provider_id("p1");

    assert!(!filter.matches(&published_entry(), &[CloudTarget::new("o2", "s1")]));
}

#[test]
fn test_content_requirement() {
    let small = ConfigurationFilter::new()
        .with_required_content(json!({"plan": "small"}).as_object().unwrap().clone());
    let large = ConfigurationFilter::new()
        .with_required_content(json!({"plan": "large"}).as_object().unwrap().clone());

    assert!(small.matches(&published_entry(), &consumer()));
    assert!(!large.matches(&published_entry(), &consumer()));
}

#[test]
fn test_namespace_requirement() {
    let blue_entry = published_entry().with_namespace("blue");

    let blue = ConfigurationFilter::new().with_provider_namespace("blue");
    let default = ConfigurationFilter::new().with_provider_namespace("default");

    assert!(blue.matches(&blue_entry, &consumer()));
    assert!(!default.matches(&blue_entry, &consumer()));
    assert!(default.matches(&published_entry(), &consumer()));
}

#[test]
fn test_global_scope_replaces_target_and_namespace_semantics() {
    let global = CloudTarget::new("deploy-org", "global-config");
    let entry = ConfigurationEntry::new("mta", "p1", global.clone())
        .with_visibility(vec![CloudTarget::any()]);
    let namespaced = entry.clone().with_namespace("blue");

    let filter = ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_target_space(CloudTarget::new("o1", "s1"));

    assert!(!filter.matches(&entry, &consumer()));
    assert_eq!(
        filter.mismatch(&entry, &consumer(), MatchScope::global(&global), None),
        None
    );
    assert_eq!(
        filter.mismatch(&namespaced, &consumer(), MatchScope::global(&global), None),
        Some(MismatchReason::Namespace)
    );
}

#[test]
fn test_select_keeps_order_of_matches() {
    let entries = vec![
        published_entry().with_id(1),
        published_entry().with_id(2).with_content(r#"{"plan":"large"}"#),
        published_entry().with_id(3),
    ];
    let filter = ConfigurationFilter::new()
        .with_required_content(json!({"plan": "small"}).as_object().unwrap().clone());

    let selected = filter.select(entries, &consumer(), MatchScope::requested(&filter));

    let ids: Vec<_> = selected.iter().filter_map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_select_with_malformed_version_selects_nothing() {
    let filter = ConfigurationFilter::new().with_provider_version("not a range");

    let selected = filter.select(
        vec![published_entry()],
        &consumer(),
        MatchScope::requested(&filter),
    );

    assert!(selected.is_empty());
    assert!(!filter.matches(&published_entry(), &consumer()));
}

#[test]
fn test_display_lists_set_fields() {
    let filter = ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_target_space(CloudTarget::new("o1", "s1"));

    assert_eq!(filter.to_string(), "provider-id=p1, target='o1 s1'");
    assert_eq!(ConfigurationFilter::new().to_string(), "<any>");
}

#[test]
fn test_serde_round_trip_uses_camel_case() {
    let filter = ConfigurationFilter::new()
        .with_provider_nid("mta")
        .with_strict_target_space(true);

    let value = serde_json::to_value(&filter).unwrap();
    assert_eq!(value, json!({"providerNid": "mta", "strictTargetSpace": true}));

    let back: ConfigurationFilter = serde_json::from_value(value).unwrap();
    assert_eq!(back, filter);
}
