//! Dry-run resolution command.
//!
//! Reads a deployment descriptor and a snapshot of published configuration
//! entries (both JSON), resolves the descriptor's configuration references
//! against the snapshot and prints the outcome.
//!
//! # Examples
//!
//! ```bash
//! mta-config resolve --descriptor mtad.json --entries entries.json --target "acme dev"
//! ```

use std::{fs, path::Path};

use clap::Args;
use configuration_entries::{CloudTarget, ConfigurationEntry, InMemoryConfigurationEntryStore};
use reference_resolver::{ConfigurationReferencesResolver, DeploymentDescriptor, ResolutionError};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "resolve_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Deployment descriptor (JSON)
    #[arg(short, long)]
    pub descriptor: String,

    /// Published configuration entries (JSON array)
    #[arg(short, long)]
    pub entries: String,

    /// Deployment target as "<org> <space>"
    #[arg(short, long)]
    pub target: String,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Execute the resolve command and return the rendered outcome.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, the target is
/// malformed, or resolution fails.
#[instrument(skip(args), fields(descriptor = %args.descriptor, target = %args.target))]
pub async fn execute(args: &ResolveArgs) -> Result<String, Error> {
    let config = AppConfig::load_effective(args.config.as_deref())?;

    let target: CloudTarget = args
        .target
        .parse()
        .map_err(|e| Error::InvalidArguments(format!("--target: {e}")))?;

    let descriptor: DeploymentDescriptor = read_json(Path::new(&args.descriptor))?;
    let entries: Vec<ConfigurationEntry> = read_json(Path::new(&args.entries))?;
    debug!(entries = entries.len(), "Loaded configuration entry snapshot");

    let store = InMemoryConfigurationEntryStore::new();
    for entry in entries {
        store.publish(entry).map_err(ResolutionError::from)?;
    }
    let resolver = ConfigurationReferencesResolver::new(&store, target, &config.resolver);
    let outcome = resolver.resolve(&descriptor).await?;

    info!(
        references = outcome.resolved_references.len(),
        "Dry-run resolution complete"
    );
    serde_json::to_string_pretty(&outcome).map_err(|e| Error::Output(e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| Error::ParseInput {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
