//! Resolution of every configuration reference in a deployment descriptor.
//!
//! Resolution runs in three passes over a borrowed descriptor:
//!
//! 1. every reference resource is resolved against the entry store, in
//!    declaration order;
//! 2. the number of matches of each reference is checked against the way it
//!    is consumed;
//! 3. a copy of the descriptor is rewritten: references are replaced by the
//!    resources they resolved to, list dependencies are expanded, and
//!    properties mentioning expanded dependencies become lists.
//!
//! Any error stops the resolution before the copy is produced.

use crate::descriptor::{
    DeploymentDescriptor, Properties, RequiredDependency, Resource, ResourceKind,
};
use crate::entry_resolver::ConfigurationReferenceResolver;
use crate::errors::{ResolutionError, ResolutionResult};
use crate::filter_parser::ConfigurationFilterParser;
use crate::properties_expander::PropertiesExpander;
use crate::settings::ResolverSettings;
use configuration_entries::{CloudTarget, ConfigurationEntryStore, ConfigurationFilter};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "references_resolver_tests.rs"]
mod tests;

/// What a reference resource resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfigurationReference {
    pub filter: ConfigurationFilter,
    pub source_resource: Resource,
    pub resolved_resources: Vec<Resource>,
}

/// Resolved references keyed by reference name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedReferences(Vec<ResolvedConfigurationReference>);

impl ResolvedReferences {
    pub fn get(&self, name: &str) -> Option<&ResolvedConfigurationReference> {
        self.0.iter().find(|r| r.source_resource.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedConfigurationReference> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.source_resource.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, reference: ResolvedConfigurationReference) {
        self.0.push(reference);
    }
}

/// A property rewritten into a list by dependency expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedProperty {
    /// Module or resource owning the property.
    pub owner: String,
    /// Property path, nested keys joined by `.`.
    pub property: String,
}

/// The result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutcome {
    pub descriptor: DeploymentDescriptor,
    pub resolved_references: ResolvedReferences,
    pub expanded_properties: Vec<ExpandedProperty>,
}

/// Resolves the configuration references of descriptors deployed into one
/// target.
///
/// # Examples
///
/// ```
/// use configuration_entries::{CloudTarget, ConfigurationEntry, InMemoryConfigurationEntryStore};
/// use reference_resolver::{
///     ConfigurationReferencesResolver, DeploymentDescriptor, Resource, ResolverSettings,
/// };
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryConfigurationEntryStore::with_entries(vec![
///     ConfigurationEntry::new("mta", "p1", CloudTarget::new("o1", "s1"))
///         .with_content(r#"{"url":"https://p1"}"#),
/// ]);
/// let descriptor = DeploymentDescriptor::new("3.3", "consumer").with_resource(
///     Resource::new("p1-config")
///         .with_type("configuration")
///         .with_parameter("provider-id", json!("p1")),
/// );
///
/// let resolver = ConfigurationReferencesResolver::new(
///     &store,
///     CloudTarget::new("o1", "s1"),
///     &ResolverSettings::default(),
/// );
/// let outcome = resolver.resolve(&descriptor).await?;
///
/// let resolved = outcome.descriptor.resource("p1-config").unwrap();
/// assert_eq!(resolved.properties["url"], json!("https://p1"));
/// # Ok::<(), reference_resolver::ResolutionError>(())
/// # }).unwrap();
/// ```
pub struct ConfigurationReferencesResolver<'a> {
    parser: ConfigurationFilterParser,
    entry_resolver: ConfigurationReferenceResolver<'a>,
}

impl<'a> ConfigurationReferencesResolver<'a> {
    pub fn new(
        store: &'a dyn ConfigurationEntryStore,
        current_target: CloudTarget,
        settings: &ResolverSettings,
    ) -> Self {
        Self {
            parser: ConfigurationFilterParser::new(current_target, settings),
            entry_resolver: ConfigurationReferenceResolver::new(
                store,
                settings.global_config_target(),
            ),
        }
    }

    /// Resolve every configuration reference of `descriptor`.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::InvalidReferenceParameter`] for malformed references
    /// - [`ResolutionError::UnresolvedReference`] when a reference that must
    ///   resolve to one resource matches nothing
    /// - [`ResolutionError::AmbiguousReference`] when it matches several
    /// - [`ResolutionError::Store`] when the entry store fails
    pub async fn resolve(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> ResolutionResult<ResolutionOutcome> {
        info!(
            mta_id = %descriptor.id,
            target = %self.parser.current_target(),
            "Resolving configuration references"
        );

        let visited = self.visit_resources(descriptor).await?;
        check_cardinality(descriptor, &visited)?;

        let mut resolved_references = ResolvedReferences::default();
        let mut inactive = Vec::new();
        for reference in visited {
            if !reference.active {
                inactive.push(reference.resolved.source_resource.name.clone());
            }
            resolved_references.insert(reference.resolved);
        }

        let mut rewriter = DescriptorRewriter {
            references: &resolved_references,
            inactive: &inactive,
            expansions: Vec::new(),
            expanded_properties: Vec::new(),
        };
        let descriptor = rewriter.rewrite(descriptor);
        let expanded_properties = rewriter.expanded_properties;

        info!(
            mta_id = %descriptor.id,
            references = resolved_references.len(),
            expanded_properties = expanded_properties.len(),
            "Configuration references resolved"
        );
        Ok(ResolutionOutcome {
            descriptor,
            resolved_references,
            expanded_properties,
        })
    }

    async fn visit_resources(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> ResolutionResult<Vec<VisitedReference>> {
        let mut visited = Vec::new();
        for resource in &descriptor.resources {
            let ResourceKind::Reference(filter) = self.parser.classify(resource)? else {
                continue;
            };

            if !resource.active {
                debug!(resource = %resource.name, "Skipping inactive configuration reference");
                visited.push(VisitedReference {
                    resolved: ResolvedConfigurationReference {
                        filter,
                        source_resource: resource.clone(),
                        resolved_resources: Vec::new(),
                    },
                    candidates: Vec::new(),
                    active: false,
                });
                continue;
            }

            let matches = self
                .entry_resolver
                .resolve(resource, &filter, self.parser.current_target())
                .await?;
            visited.push(VisitedReference {
                resolved: ResolvedConfigurationReference {
                    filter,
                    source_resource: resource.clone(),
                    resolved_resources: matches.resources,
                },
                candidates: matches.entries.iter().map(ToString::to_string).collect(),
                active: true,
            });
        }
        Ok(visited)
    }
}

struct VisitedReference {
    resolved: ResolvedConfigurationReference,
    candidates: Vec<String>,
    active: bool,
}

/// A reference must resolve to exactly one resource unless it is only ever
/// consumed through list dependencies.
fn check_cardinality(
    descriptor: &DeploymentDescriptor,
    visited: &[VisitedReference],
) -> ResolutionResult<()> {
    for reference in visited.iter().filter(|r| r.active) {
        let name = &reference.resolved.source_resource.name;
        let mut consumers = descriptor
            .required_dependencies()
            .filter(|dependency| &dependency.name == name)
            .peekable();
        let list_only = consumers.peek().is_some()
            && consumers.all(RequiredDependency::permits_multiple_resources);
        if list_only {
            continue;
        }

        match reference.resolved.resolved_resources.len() {
            1 => {}
            0 => {
                warn!(resource = %name, "Configuration reference matched no entries");
                return Err(ResolutionError::UnresolvedReference {
                    resource: name.clone(),
                });
            }
            count => {
                warn!(resource = %name, matches = count, "Configuration reference is ambiguous");
                return Err(ResolutionError::AmbiguousReference {
                    resource: name.clone(),
                    candidates: reference.candidates.clone(),
                });
            }
        }
    }
    Ok(())
}

struct DescriptorRewriter<'r> {
    references: &'r ResolvedReferences,
    inactive: &'r [String],
    /// Reference name and the dependency names it was expanded into.
    expansions: Vec<(String, Vec<String>)>,
    expanded_properties: Vec<ExpandedProperty>,
}

impl DescriptorRewriter<'_> {
    fn rewrite(&mut self, descriptor: &DeploymentDescriptor) -> DeploymentDescriptor {
        let references = self.references;
        let mut rewritten = descriptor.clone();

        rewritten.resources = descriptor
            .resources
            .iter()
            .flat_map(|resource| match references.get(&resource.name) {
                Some(reference) => reference.resolved_resources.clone(),
                None => vec![resource.clone()],
            })
            .collect();

        for module in &mut rewritten.modules {
            module.requires = self.expand_dependencies(&module.requires, &mut module.properties);
        }
        for resource in &mut rewritten.resources {
            resource.requires =
                self.expand_dependencies(&resource.requires, &mut resource.properties);
        }

        for module in &mut rewritten.modules {
            module.properties = self.expand_properties(&module.name, &module.properties);
        }
        for resource in &mut rewritten.resources {
            resource.properties = self.expand_properties(&resource.name, &resource.properties);
        }

        rewritten
    }

    fn expand_dependencies(
        &mut self,
        dependencies: &[RequiredDependency],
        owner_properties: &mut Properties,
    ) -> Vec<RequiredDependency> {
        let references = self.references;
        let inactive = self.inactive;
        let mut expanded = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let Some(reference) = references.get(&dependency.name) else {
                expanded.push(dependency.clone());
                continue;
            };

            if inactive.contains(&dependency.name) {
                if let Some(list) = &dependency.list {
                    put_empty_list(owner_properties, list);
                    self.record_expansion(&dependency.name, Vec::new());
                }
                continue;
            }

            let Some(list) = &dependency.list else {
                expanded.push(dependency.clone());
                continue;
            };

            if reference.resolved_resources.is_empty() {
                put_empty_list(owner_properties, list);
            }
            let names: Vec<String> = reference
                .resolved_resources
                .iter()
                .map(|resource| resource.name.clone())
                .collect();
            expanded.extend(names.iter().map(|name| RequiredDependency {
                name: name.clone(),
                ..dependency.clone()
            }));
            self.record_expansion(&dependency.name, names);
        }
        expanded
    }

    fn record_expansion(&mut self, reference: &str, names: Vec<String>) {
        if self.expansions.iter().all(|(existing, _)| existing != reference) {
            debug!(reference = reference, expanded = ?names, "Expanded list dependency");
            self.expansions.push((reference.to_string(), names));
        }
    }

    fn expand_properties(&mut self, owner: &str, properties: &Properties) -> Properties {
        let mut properties = properties.clone();
        for (reference, names) in &self.expansions {
            let mut expander = PropertiesExpander::new(reference, names.clone());
            properties = expander.expand(&properties);
            self.expanded_properties
                .extend(expander.expanded_properties().iter().map(|property| {
                    ExpandedProperty {
                        owner: owner.to_string(),
                        property: property.clone(),
                    }
                }));
        }
        properties
    }
}

fn put_empty_list(properties: &mut Properties, list: &str) {
    properties
        .entry(list.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
}
