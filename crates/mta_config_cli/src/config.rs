//! Configuration for the `mta-config` CLI.
//!
//! The configuration is stored in TOML format. It is loaded from a given path
//! or from `mta-config.toml` in the current directory, and the resolver
//! settings are then overlaid with the deploy service environment variables.
//!
//! ```toml
//! [resolver]
//! global_config_space = "global-config"
//! deploy_service_org = "deploy-service"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use reference_resolver::ResolverSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mta-config.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverSettings,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// does not contain valid configuration.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;
        config
            .resolver
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(config)
    }

    /// Load the configuration the commands run with.
    ///
    /// An explicit path must exist. Without one, `mta-config.toml` is used if
    /// present and the defaults otherwise. Environment overrides are applied
    /// last.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the selected file cannot be loaded.
    pub fn load_effective(path: Option<&str>) -> Result<Self, Error> {
        let config_path = get_config_path(path);
        let mut config = if path.is_some() || config_path.exists() {
            Self::load(&config_path)?
        } else {
            info!("No configuration file found; using defaults");
            Self::default()
        };

        config.resolver = config.resolver.with_env_overrides();
        Ok(config)
    }
}

/// Resolve the configuration file path, falling back to the default file name.
pub fn get_config_path(path: Option<&str>) -> PathBuf {
    path.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}
