//! Shared helpers for the scenario tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use async_trait::async_trait;
use configuration_entries::{
    CloudTarget, ConfigurationEntry, ConfigurationEntryStore, EntryQuery,
    InMemoryConfigurationEntryStore, StoreResult,
};
use reference_resolver::{
    ConfigurationReferencesResolver, DeploymentDescriptor, ResolutionOutcome, ResolutionResult,
    ResolverSettings,
};
use tracing::debug;

static LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// `RUST_LOG` selects the level and defaults to `info`.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// In-memory store that counts the queries it answers.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: InMemoryConfigurationEntryStore,
    queries: AtomicUsize,
}

impl CountingStore {
    pub fn with_entries(entries: Vec<ConfigurationEntry>) -> Self {
        Self {
            inner: InMemoryConfigurationEntryStore::with_entries(entries),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigurationEntryStore for CountingStore {
    async fn find(&self, query: &EntryQuery) -> StoreResult<Vec<ConfigurationEntry>> {
        let count = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(query = ?query, count = count, "Entry store queried");
        self.inner.find(query).await
    }
}

/// Resolve `descriptor` for a deployment into `target`.
pub async fn resolve_in(
    store: &dyn ConfigurationEntryStore,
    target: CloudTarget,
    settings: &ResolverSettings,
    descriptor: &DeploymentDescriptor,
) -> ResolutionResult<ResolutionOutcome> {
    ConfigurationReferencesResolver::new(store, target, settings)
        .resolve(descriptor)
        .await
}
