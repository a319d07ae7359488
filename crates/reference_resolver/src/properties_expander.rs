//! Expansion of properties that reference a list dependency.
//!
//! When a list dependency `peers` resolves to `peers.0` and `peers.1`, a
//! property such as `"~{peers/url}"` becomes
//! `["~{peers.0/url}", "~{peers.1/url}"]`.

use crate::descriptor::Properties;
use serde_json::Value;

#[cfg(test)]
#[path = "properties_expander_tests.rs"]
mod tests;

#[derive(Debug, Clone)]
pub struct PropertiesExpander {
    original_reference: String,
    expanded_references: Vec<String>,
    expanded_properties: Vec<String>,
}

impl PropertiesExpander {
    pub fn new(original_dependency_name: &str, expanded_dependency_names: Vec<String>) -> Self {
        Self {
            original_reference: reference_prefix(original_dependency_name),
            expanded_references: expanded_dependency_names
                .iter()
                .map(|name| reference_prefix(name))
                .collect(),
            expanded_properties: Vec::new(),
        }
    }

    /// Expand every property that references the original dependency.
    ///
    /// Nested maps are expanded in place. Strings inside lists are left alone.
    pub fn expand(&mut self, properties: &Properties) -> Properties {
        self.expand_map(properties, "")
    }

    /// Paths of the properties expanded so far, nested keys joined by `.`.
    pub fn expanded_properties(&self) -> &[String] {
        &self.expanded_properties
    }

    fn expand_map(&mut self, properties: &Properties, path: &str) -> Properties {
        properties
            .iter()
            .map(|(key, value)| {
                let property_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let expanded = self.expand_value(value, &property_path);
                (key.clone(), expanded)
            })
            .collect()
    }

    fn expand_value(&mut self, value: &Value, path: &str) -> Value {
        match value {
            Value::String(text) if text.contains(&self.original_reference) => {
                self.expanded_properties.push(path.to_string());
                Value::Array(
                    self.expanded_references
                        .iter()
                        .map(|reference| {
                            Value::String(text.replace(&self.original_reference, reference))
                        })
                        .collect(),
                )
            }
            Value::Object(map) => Value::Object(self.expand_map(map, path)),
            other => other.clone(),
        }
    }
}

fn reference_prefix(dependency_name: &str) -> String {
    format!("~{{{dependency_name}/")
}
