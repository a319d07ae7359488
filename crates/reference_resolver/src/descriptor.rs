//! The parts of an MTA deployment descriptor that take part in resolution.
//!
//! Descriptors arrive already parsed. Field names follow the descriptor
//! format (`_schema-version`, `ID`, `requires`), so a descriptor serialized
//! from JSON or a YAML-to-JSON conversion deserializes directly.

use configuration_entries::ConfigurationFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;

/// Free-form parameters or properties of a descriptor element.
pub type Properties = Map<String, Value>;

/// A deployment descriptor: the MTA's modules and the resources they require.
///
/// Resolution rewrites `resources` (references become one or more concrete
/// resources) and the `requires` lists that point at them. Everything else is
/// carried through untouched.
///
/// # Examples
///
/// ```
/// use reference_resolver::{DeploymentDescriptor, Module, RequiredDependency, Resource};
///
/// let descriptor = DeploymentDescriptor::new("3.3", "com.acme.shop")
///     .with_module(Module::new("app").with_requires(RequiredDependency::new("db")))
///     .with_resource(Resource::new("db"));
///
/// assert!(descriptor.resource("db").is_some());
/// assert_eq!(descriptor.required_dependencies().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    /// Descriptor format version, e.g. `"3.3"`.
    #[serde(rename = "_schema-version")]
    pub schema_version: String,

    /// MTA id.
    #[serde(rename = "ID")]
    pub id: String,

    /// MTA version, when the descriptor carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Deployment namespace, when the MTA is deployed under one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub modules: Vec<Module>,

    /// Resources in declaration order. Resolution keeps this order, inserting
    /// the resources built for a reference where the reference stood.
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl DeploymentDescriptor {
    /// Creates an empty descriptor.
    pub fn new(schema_version: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            schema_version: schema_version.into(),
            id: id.into(),
            version: None,
            namespace: None,
            modules: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Appends a module.
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Appends a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Looks up a resource by name. Names are unique within a descriptor.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Every required dependency in the descriptor, modules first.
    pub fn required_dependencies(&self) -> impl Iterator<Item = &RequiredDependency> {
        self.modules
            .iter()
            .flat_map(|m| m.requires.iter())
            .chain(self.resources.iter().flat_map(|r| r.requires.iter()))
    }
}

/// A deployable unit of the MTA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,

    /// Module type, e.g. `nodejs`. Not interpreted by the resolver.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Properties,

    /// Module properties. A list dependency that binds several resources
    /// collects their placeholders under one of these keys.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Properties,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequiredDependency>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_type: None,
            parameters: Properties::new(),
            properties: Properties::new(),
            requires: Vec::new(),
        }
    }

    /// Sets a property, replacing any previous value under `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_requires(mut self, dependency: RequiredDependency) -> Self {
        self.requires.push(dependency);
        self
    }
}

/// A resource of the MTA, or a reference to published configuration.
///
/// A resource is a reference when its type matches the configured
/// configuration resource type; see [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,

    /// Resource type. Compared against the configured configuration resource
    /// type to tell references from concrete resources.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Inactive resources are skipped by resolution. Defaults to `true`.
    #[serde(default = "default_active")]
    pub active: bool,

    /// Resource parameters. For a reference these hold the filter
    /// (`provider-id`, `version`, `target` and so on).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Properties,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Properties,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequiredDependency>,
}

/// How the resolver treats a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceKind {
    /// An ordinary resource, passed through unchanged.
    Concrete,
    /// A placeholder for published configuration matching the filter.
    Reference(ConfigurationFilter),
}

impl ResourceKind {
    /// The filter of a reference; `None` for a concrete resource.
    pub fn filter(&self) -> Option<&ConfigurationFilter> {
        match self {
            Self::Concrete => None,
            Self::Reference(filter) => Some(filter),
        }
    }
}

fn default_active() -> bool {
    true
}

impl Resource {
    /// Creates an active resource with no type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: None,
            active: true,
            parameters: Properties::new(),
            properties: Properties::new(),
            requires: Vec::new(),
        }
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Marks the resource active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets a parameter, replacing any previous value under `key`.
    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_requires(mut self, dependency: RequiredDependency) -> Self {
        self.requires.push(dependency);
        self
    }
}

/// A `requires` entry of a module or resource.
///
/// When `list` is set the dependency may bind any number of resources, which
/// are collected under the owner's property of that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredDependency {
    /// Name of the required module or resource.
    pub name: String,

    /// Property group the dependency's provided values are placed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Owner property that collects the placeholders of every bound resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Properties,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Properties,
}

impl RequiredDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            list: None,
            parameters: Properties::new(),
            properties: Properties::new(),
        }
    }

    /// Turns the dependency into a list dependency collected under `list`.
    pub fn with_list(mut self, list: impl Into<String>) -> Self {
        self.list = Some(list.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Whether a reference behind this dependency may resolve to more than
    /// one resource. Only list dependencies may.
    pub fn permits_multiple_resources(&self) -> bool {
        self.list.is_some()
    }
}
