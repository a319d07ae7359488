//! Tests for the two-phase entry lookup.

use super::*;
use crate::errors::StoreError;
use crate::store::InMemoryConfigurationEntryStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_test::traced_test;

/// Store that counts queries and delegates to an in-memory store.
struct CountingStore {
    inner: InMemoryConfigurationEntryStore,
    queries: AtomicUsize,
}

impl CountingStore {
    fn new(entries: Vec<ConfigurationEntry>) -> Self {
        Self {
            inner: InMemoryConfigurationEntryStore::with_entries(entries),
            queries: AtomicUsize::new(0),
        }
    }

    fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigurationEntryStore for CountingStore {
    async fn find(&self, query: &EntryQuery) -> StoreResult<Vec<ConfigurationEntry>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find(query).await
    }
}

/// Store that is always down.
struct UnavailableStore;

#[async_trait]
impl ConfigurationEntryStore for UnavailableStore {
    async fn find(&self, _query: &EntryQuery) -> StoreResult<Vec<ConfigurationEntry>> {
        Err(StoreError::Unavailable {
            reason: "database offline".to_string(),
        })
    }
}

fn global_target() -> CloudTarget {
    CloudTarget::new("deploy-org", "global-config")
}

fn consumer() -> Vec<CloudTarget> {
    vec![CloudTarget::new("o1", "s1")]
}

fn local_entry() -> ConfigurationEntry {
    ConfigurationEntry::new("mta", "p1", CloudTarget::new("o1", "s1")).with_id(1)
}

fn global_entry() -> ConfigurationEntry {
    ConfigurationEntry::new("mta", "p1", global_target())
        .with_id(2)
        .with_visibility(vec![CloudTarget::any()])
}

fn filter() -> ConfigurationFilter {
    ConfigurationFilter::new()
        .with_provider_id("p1")
        .with_target_space(CloudTarget::new("o1", "s1"))
}

#[tokio::test]
async fn test_local_match_skips_global_space() {
    let store = CountingStore::new(vec![local_entry(), global_entry()]);

    let found = find_configuration_entries(&store, &filter(), &consumer(), Some(&global_target()))
        .await
        .unwrap();

    assert_eq!(found, vec![local_entry()]);
    assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_falls_back_to_global_space() {
    let store = CountingStore::new(vec![global_entry()]);

    let found = find_configuration_entries(&store, &filter(), &consumer(), Some(&global_target()))
        .await
        .unwrap();

    assert_eq!(found, vec![global_entry()]);
    assert_eq!(store.query_count(), 2);
}

#[tokio::test]
async fn test_strict_filter_never_falls_back() {
    let store = CountingStore::new(vec![global_entry()]);
    let strict = filter().with_strict_target_space(true);

    let found = find_configuration_entries(&store, &strict, &consumer(), Some(&global_target()))
        .await
        .unwrap();

    assert!(found.is_empty());
    assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_no_global_space_configured() {
    let store = CountingStore::new(vec![global_entry()]);

    let found = find_configuration_entries(&store, &filter(), &consumer(), None)
        .await
        .unwrap();

    assert!(found.is_empty());
    assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_global_space_ignores_namespaced_entries_by_default() {
    let store = CountingStore::new(vec![global_entry().with_namespace("blue")]);

    let found = find_configuration_entries(&store, &filter(), &consumer(), Some(&global_target()))
        .await
        .unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_global_space_respects_visibility() {
    let hidden = global_entry().with_visibility(vec![CloudTarget::new("o9", "*")]);
    let store = CountingStore::new(vec![hidden]);

    let found = find_configuration_entries(&store, &filter(), &consumer(), Some(&global_target()))
        .await
        .unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_store_failure_is_propagated() {
    let result = find_configuration_entries(
        &UnavailableStore,
        &filter(),
        &consumer(),
        Some(&global_target()),
    )
    .await;

    assert_eq!(
        result,
        Err(StoreError::Unavailable {
            reason: "database offline".to_string()
        })
    );
}

#[tokio::test]
#[traced_test]
async fn test_rejections_are_logged_with_reason() {
    let old = local_entry().with_version("1.0.0".parse().unwrap());
    let store = CountingStore::new(vec![old]);
    let versioned = filter().with_provider_version("^2.0.0");

    let found = find_configuration_entries(&store, &versioned, &consumer(), None)
        .await
        .unwrap();

    assert!(found.is_empty());
    assert!(logs_contain("Configuration entry rejected"));
    assert!(logs_contain("reason=\"version\""));
}
