//! Configuration reference resolution for MTA deployment descriptors.
//!
//! A descriptor may declare resources that stand for configuration published
//! by other deployments. [`ConfigurationReferencesResolver`] finds the
//! published entries each such reference asks for, checks that the number of
//! matches fits the way the reference is consumed, and returns a rewritten
//! copy of the descriptor in which every reference has been replaced by
//! concrete resources.

pub mod descriptor;
pub mod entry_resolver;
pub mod errors;
pub mod filter_parser;
pub mod properties_expander;
pub mod references_resolver;
pub mod settings;

pub use descriptor::{
    DeploymentDescriptor, Module, Properties, RequiredDependency, Resource, ResourceKind,
};
pub use entry_resolver::{ConfigurationReferenceResolver, ReferenceMatches};
pub use errors::{ResolutionError, ResolutionResult};
pub use filter_parser::ConfigurationFilterParser;
pub use properties_expander::PropertiesExpander;
pub use references_resolver::{
    ConfigurationReferencesResolver, ExpandedProperty, ResolutionOutcome,
    ResolvedConfigurationReference, ResolvedReferences,
};
pub use settings::ResolverSettings;
