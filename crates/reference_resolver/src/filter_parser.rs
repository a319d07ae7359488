//! Turning reference resources into configuration filters.
//!
//! Two reference syntaxes are understood, each marked by a resource type:
//!
//! * configuration references (`provider-nid`, `provider-id`, `version`,
//!   `provider-namespace`, `target`, `filter` parameters);
//! * legacy references to a dependency provided by another MTA (`mta-id`,
//!   `mta-version`, `mta-provides-dependency` parameters).

use crate::descriptor::{Resource, ResourceKind};
use crate::errors::{ResolutionError, ResolutionResult};
use crate::settings::ResolverSettings;
use configuration_entries::{
    compute_provider_id, CloudTarget, ConfigurationFilter, PROVIDER_NID_MTA,
};
use serde_json::{Map, Value};
use tracing::debug;

#[cfg(test)]
#[path = "filter_parser_tests.rs"]
mod tests;

// Reference parameter names.
pub const PROVIDER_NID: &str = "provider-nid";
pub const PROVIDER_ID: &str = "provider-id";
pub const VERSION: &str = "version";
pub const PROVIDER_NAMESPACE: &str = "provider-namespace";
pub const TARGET: &str = "target";
pub const FILTER: &str = "filter";
pub const MTA_ID: &str = "mta-id";
pub const MTA_VERSION: &str = "mta-version";
pub const MTA_PROVIDES_DEPENDENCY: &str = "mta-provides-dependency";

// Keys of the `target` object.
pub const ORGANIZATION_NAME: &str = "org";
pub const SPACE_NAME: &str = "space";

/// Parameters consumed by the resolver. They are dropped from the concrete
/// resources a reference resolves to.
pub const CONFIGURATION_REFERENCE_PARAMETERS: &[&str] = &[
    PROVIDER_NID,
    PROVIDER_ID,
    VERSION,
    PROVIDER_NAMESPACE,
    TARGET,
    FILTER,
    MTA_ID,
    MTA_VERSION,
    MTA_PROVIDES_DEPENDENCY,
];

/// Classifies resources and builds the filters of references.
#[derive(Debug, Clone)]
pub struct ConfigurationFilterParser {
    current_target: CloudTarget,
    configuration_resource_type: String,
    legacy_resource_type: String,
}

impl ConfigurationFilterParser {
    /// A parser for a deployment into `current_target`.
    pub fn new(current_target: CloudTarget, settings: &ResolverSettings) -> Self {
        Self {
            current_target,
            configuration_resource_type: settings.configuration_resource_type.clone(),
            legacy_resource_type: settings.legacy_resource_type.clone(),
        }
    }

    pub fn current_target(&self) -> &CloudTarget {
        &self.current_target
    }

    /// Decide whether `resource` is a reference and, if so, what it asks for.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidReferenceParameter`] when a reference
    /// parameter has the wrong shape or a required one is missing.
    pub fn classify(&self, resource: &Resource) -> ResolutionResult<ResourceKind> {
        let Some(resource_type) = resource.resource_type.as_deref() else {
            return Ok(ResourceKind::Concrete);
        };

        let filter = if resource_type == self.configuration_resource_type {
            self.parse_configuration_reference(resource)?
        } else if resource_type == self.legacy_resource_type {
            self.parse_legacy_reference(resource)?
        } else {
            return Ok(ResourceKind::Concrete);
        };

        debug!(
            resource = %resource.name,
            filter = %filter,
            "Resource is a configuration reference"
        );
        Ok(ResourceKind::Reference(filter))
    }

    fn parse_configuration_reference(
        &self,
        resource: &Resource,
    ) -> ResolutionResult<ConfigurationFilter> {
        let explicit_target = target_parameter(resource)?;
        let strict_target_space = explicit_target.is_some();

        Ok(ConfigurationFilter {
            provider_nid: string_parameter(resource, PROVIDER_NID)?,
            provider_id: string_parameter(resource, PROVIDER_ID)?,
            provider_version: string_parameter(resource, VERSION)?,
            provider_namespace: string_parameter(resource, PROVIDER_NAMESPACE)?,
            target_space: Some(explicit_target.unwrap_or_else(|| self.current_target.clone())),
            required_content: object_parameter(resource, FILTER)?,
            strict_target_space,
        })
    }

    fn parse_legacy_reference(&self, resource: &Resource) -> ResolutionResult<ConfigurationFilter> {
        let mta_id = required_string_parameter(resource, MTA_ID)?;
        let dependency = required_string_parameter(resource, MTA_PROVIDES_DEPENDENCY)?;

        Ok(ConfigurationFilter {
            provider_nid: Some(PROVIDER_NID_MTA.to_string()),
            provider_id: Some(compute_provider_id(&mta_id, &dependency)),
            provider_version: string_parameter(resource, MTA_VERSION)?,
            provider_namespace: None,
            target_space: Some(self.current_target.clone()),
            required_content: None,
            strict_target_space: false,
        })
    }
}

/// A string parameter.
///
/// Numbers are rejected: an unquoted `1.10` has already lost its trailing
/// zero by the time it reaches the resolver.
fn string_parameter(resource: &Resource, name: &str) -> ResolutionResult<Option<String>> {
    match resource.parameters.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(invalid(
            resource,
            name,
            format!("expected a string but got {}", kind_of(other)),
        )),
    }
}

fn required_string_parameter(resource: &Resource, name: &str) -> ResolutionResult<String> {
    string_parameter(resource, name)?
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| invalid(resource, name, "required parameter is missing".to_string()))
}

fn object_parameter(
    resource: &Resource,
    name: &str,
) -> ResolutionResult<Option<Map<String, Value>>> {
    match resource.parameters.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(other) => Err(invalid(
            resource,
            name,
            format!("expected a map but got {}", kind_of(other)),
        )),
    }
}

/// The `target` parameter, either `{org, space}` or `"<org> <space>"`.
fn target_parameter(resource: &Resource) -> ResolutionResult<Option<CloudTarget>> {
    match resource.parameters.get(TARGET) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => text
            .parse::<CloudTarget>()
            .map(Some)
            .map_err(|e| invalid(resource, TARGET, e.to_string())),
        Some(Value::Object(map)) => {
            let part = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| {
                        invalid(resource, TARGET, format!("\"{key}\" must be a non-empty string"))
                    })
            };
            Ok(Some(CloudTarget::new(part(ORGANIZATION_NAME)?, part(SPACE_NAME)?)))
        }
        Some(other) => Err(invalid(
            resource,
            TARGET,
            format!("expected a map or a string but got {}", kind_of(other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

fn invalid(resource: &Resource, parameter: &str, reason: String) -> ResolutionError {
    ResolutionError::InvalidReferenceParameter {
        resource: resource.name.clone(),
        parameter: parameter.to_string(),
        reason,
    }
}
