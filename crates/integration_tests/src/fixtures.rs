//! Test fixtures for integration tests.
//!
//! Entries and descriptors shared across scenarios, so every test reads the
//! same published landscape:
//!
//! - organization `o1` with spaces `s1` (provider) and `s2` (consumer)
//! - organization `o2`, which cannot see `o1` entries by default
//! - a global configuration space `deploy-service global-config`

use configuration_entries::{CloudTarget, ConfigurationEntry};
use reference_resolver::{DeploymentDescriptor, Module, RequiredDependency, Resource};
use serde_json::{json, Value};

pub const PROVIDER_ORG: &str = "o1";
pub const PROVIDER_SPACE: &str = "s1";
pub const CONSUMER_SPACE: &str = "s2";
pub const DEPLOY_SERVICE_ORG: &str = "deploy-service";
pub const GLOBAL_CONFIG_SPACE: &str = "global-config";

pub fn provider_target() -> CloudTarget {
    CloudTarget::new(PROVIDER_ORG, PROVIDER_SPACE)
}

pub fn consumer_target() -> CloudTarget {
    CloudTarget::new(PROVIDER_ORG, CONSUMER_SPACE)
}

pub fn global_target() -> CloudTarget {
    CloudTarget::new(DEPLOY_SERVICE_ORG, GLOBAL_CONFIG_SPACE)
}

/// Entries published into the landscape.
pub mod entries {
    use super::*;

    /// `p1` at 1.2.0 in `o1 s1`, visible to all of `o1`.
    pub fn p1() -> ConfigurationEntry {
        ConfigurationEntry::new("mta", "p1", provider_target())
            .with_id(1)
            .with_version(semver_version("1.2.0"))
            .with_visibility(vec![CloudTarget::organization_wide(PROVIDER_ORG)])
            .with_content(json!({ "url": "https://p1.o1.example", "plan": "standard" }).to_string())
    }

    /// A second `p1` publication from another space of `o1`.
    pub fn p1_replica(space: &str, plan: &str) -> ConfigurationEntry {
        ConfigurationEntry::new("mta", "p1", CloudTarget::new(PROVIDER_ORG, space))
            .with_version(semver_version("1.4.0"))
            .with_visibility(vec![CloudTarget::organization_wide(PROVIDER_ORG)])
            .with_content(
                json!({ "url": format!("https://p1.{space}.example"), "plan": plan }).to_string(),
            )
    }

    /// A dependency provided by the MTA `com.acme.shop`.
    pub fn shop_db(version: &str) -> ConfigurationEntry {
        ConfigurationEntry::new("mta", "com.acme.shop:db", provider_target())
            .with_version(semver_version(version))
            .with_content(json!({ "host": "db.internal", "port": 5432 }).to_string())
    }

    /// Shared configuration in the global configuration space, visible to all.
    pub fn global_smtp() -> ConfigurationEntry {
        ConfigurationEntry::new("mta", "smtp", global_target())
            .with_visibility(vec![CloudTarget::any()])
            .with_content(json!({ "relay": "smtp.example" }).to_string())
    }

    fn semver_version(text: &str) -> semver::Version {
        semver::Version::parse(text)
            .unwrap_or_else(|e| panic!("invalid fixture version {text}: {e}"))
    }
}

/// Descriptors and reference resources.
pub mod descriptors {
    use super::*;

    /// A configuration reference to `p1` with an explicit target.
    pub fn p1_reference(name: &str, version: &str, target: Value) -> Resource {
        Resource::new(name)
            .with_type("configuration")
            .with_parameter("provider-id", json!("p1"))
            .with_parameter("version", json!(version))
            .with_parameter("target", target)
    }

    /// A legacy reference to a dependency provided by another MTA.
    pub fn legacy_reference(name: &str, mta_id: &str, dependency: &str) -> Resource {
        Resource::new(name)
            .with_type("mta-provided")
            .with_parameter("mta-id", json!(mta_id))
            .with_parameter("mta-provides-dependency", json!(dependency))
    }

    /// A consumer descriptor whose module `app` requires `dependency` and
    /// reads `~{<reference>/url}` into its `urls` property.
    pub fn consumer(reference: Resource, dependency: RequiredDependency) -> DeploymentDescriptor {
        let url_placeholder = format!("~{{{}/url}}", reference.name);
        DeploymentDescriptor::new("3.3", "com.example.consumer")
            .with_module(
                Module::new("app")
                    .with_property("urls", json!(url_placeholder))
                    .with_requires(dependency),
            )
            .with_resource(Resource::new("db").with_type("managed-service"))
            .with_resource(reference)
    }
}
