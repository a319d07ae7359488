//! Resolver settings.
//!
//! Settings come from TOML (a file or inline text) and are then overlaid with
//! the deploy service's environment variables.
//!
//! ```toml
//! global_config_space = "global-config"
//! deploy_service_org = "deploy-service"
//! configuration_resource_type = "configuration"
//! legacy_resource_type = "mta-provided"
//! ```

use crate::errors::{ResolutionError, ResolutionResult};
use configuration_entries::CloudTarget;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Environment variable naming the global configuration space.
pub const GLOBAL_CONFIG_SPACE_ENV: &str = "GLOBAL_CONFIG_SPACE";

/// Environment variable naming the organization of the deploy service.
pub const DEPLOY_SERVICE_ORG_ENV: &str = "DEPLOY_SERVICE_ORG_NAME";

/// Resource type marking a configuration reference.
pub const DEFAULT_CONFIGURATION_RESOURCE_TYPE: &str = "configuration";
/// Resource type of old-style references, read with the legacy parameter names.
pub const DEFAULT_LEGACY_RESOURCE_TYPE: &str = "mta-provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Space, in the deploy service's organization, holding configuration
    /// shared with every deployment.
    pub global_config_space: Option<String>,

    pub deploy_service_org: Option<String>,

    /// Resource type marking a configuration reference.
    pub configuration_resource_type: String,

    /// Resource type of the older `mta-id` based references.
    pub legacy_resource_type: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            global_config_space: None,
            deploy_service_org: None,
            configuration_resource_type: DEFAULT_CONFIGURATION_RESOURCE_TYPE.to_string(),
            legacy_resource_type: DEFAULT_LEGACY_RESOURCE_TYPE.to_string(),
        }
    }
}

impl ResolverSettings {
    /// Parse settings from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Settings`] for malformed TOML or blank
    /// resource types.
    pub fn from_toml_str(text: &str) -> ResolutionResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| ResolutionError::Settings {
            reason: format!("Failed to parse resolver settings: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Settings`] if the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> ResolutionResult<Self> {
        debug!(path = ?path, "Loading resolver settings");
        let text = fs::read_to_string(path).map_err(|e| ResolutionError::Settings {
            reason: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Overlay values from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`. Blank values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(space) = read(GLOBAL_CONFIG_SPACE_ENV) {
            info!(global_config_space = %space, "Global configuration space set from environment");
            self.global_config_space = Some(space);
        }
        if let Some(org) = read(DEPLOY_SERVICE_ORG_ENV) {
            info!(deploy_service_org = %org, "Deploy service organization set from environment");
            self.deploy_service_org = Some(org);
        }
        self
    }

    /// The global configuration space, when both of its parts are known.
    pub fn global_config_target(&self) -> Option<CloudTarget> {
        let org = self.deploy_service_org.as_deref().filter(|v| !v.trim().is_empty())?;
        let space = self.global_config_space.as_deref().filter(|v| !v.trim().is_empty())?;
        Some(CloudTarget::new(org, space))
    }

    /// Check values that TOML parsing alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Settings`] for blank resource types.
    pub fn validate(&self) -> ResolutionResult<()> {
        if self.configuration_resource_type.trim().is_empty() {
            return Err(ResolutionError::Settings {
                reason: "configuration_resource_type must not be blank".to_string(),
            });
        }
        if self.legacy_resource_type.trim().is_empty() {
            return Err(ResolutionError::Settings {
                reason: "legacy_resource_type must not be blank".to_string(),
            });
        }
        Ok(())
    }
}
