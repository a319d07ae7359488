//! Provider version constraints.
//!
//! Requirements are written in the comma-free range grammar used in
//! deployment descriptors:
//!
//! | Expression          | Meaning                       |
//! |---------------------|-------------------------------|
//! | `1.2.0`             | exactly 1.2.0                 |
//! | `^1.2.0`            | `>=1.2.0, <2.0.0`             |
//! | `~1.2.0`            | `>=1.2.0, <1.3.0`             |
//! | `1.x`, `1.*`, `1`   | any 1.y.z                     |
//! | `1.2`               | any 1.2.z                     |
//! | `>=1.0.0 <2.0.0`    | both comparators              |
//! | `1.0.0 - 2.0.0`     | `>=1.0.0, <=2.0.0`            |
//! | `^1.0.0 \|\| ^3.0.0`  | either range                  |
//!
//! Expressions are normalised into [`semver::VersionReq`] alternatives.

use crate::configuration_entry::ConfigurationEntry;
use semver::{Version, VersionReq};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '^', '~'];

/// A parsed version range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    expression: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range expression.
    ///
    /// A blank expression matches any release version.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`semver::Error`] when a comparator is malformed.
    pub fn parse(expression: &str) -> Result<Self, semver::Error> {
        let alternatives = expression
            .split("||")
            .map(parse_alternative)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            expression: expression.trim().to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies any alternative of the range.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.expression
    }
}

impl FromStr for VersionRange {
    type Err = semver::Error;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        Self::parse(expression)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Whether `entry` satisfies the version `requirement`.
///
/// No requirement is always satisfied. An entry without a version never
/// satisfies an explicit requirement. An unparsable requirement is satisfied
/// by nothing.
pub fn satisfies(entry: &ConfigurationEntry, requirement: Option<&str>) -> bool {
    let Some(requirement) = requirement else {
        return true;
    };

    match VersionRange::parse(requirement) {
        Ok(range) => satisfies_range(entry, Some(&range)),
        Err(error) => {
            warn!(
                requirement = requirement,
                error = %error,
                "Version requirement cannot be parsed; no entry can satisfy it"
            );
            false
        }
    }
}

/// Same as [`satisfies`] with an already parsed range.
pub fn satisfies_range(entry: &ConfigurationEntry, range: Option<&VersionRange>) -> bool {
    let Some(range) = range else {
        return true;
    };

    match &entry.provider_version {
        Some(version) => range.matches(version),
        None => false,
    }
}

fn parse_alternative(expression: &str) -> Result<VersionReq, semver::Error> {
    let tokens = comparator_tokens(expression);

    if let [low, separator, high] = tokens.as_slice() {
        if separator == "-" {
            return VersionReq::parse(&format!(">={low}, <={high}"));
        }
    }

    if tokens.is_empty() {
        return Ok(VersionReq::STAR);
    }

    let comparators: Vec<String> = tokens.iter().map(|token| normalise_token(token)).collect();
    VersionReq::parse(&comparators.join(", "))
}

/// Split on whitespace, re-attaching detached operators (`>= 1.0.0`).
fn comparator_tokens(expression: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending_operator: Option<&str> = None;

    for token in expression.split_whitespace() {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            pending_operator = Some(token);
            continue;
        }
        match pending_operator.take() {
            Some(operator) => tokens.push(format!("{operator}{token}")),
            None => tokens.push(token.to_string()),
        }
    }

    // A dangling operator is kept so that parsing reports it.
    if let Some(operator) = pending_operator {
        tokens.push(operator.to_string());
    }

    tokens
}

/// Give operator-less comparators their descriptor meaning.
///
/// A full version is an exact match and a partial version is a wildcard,
/// rather than the caret default of [`VersionReq`].
fn normalise_token(token: &str) -> String {
    if token.starts_with(OPERATOR_CHARS) {
        return token.to_string();
    }
    if Version::parse(token).is_ok() {
        return format!("={token}");
    }

    let is_partial = token.starts_with(|c: char| c.is_ascii_digit())
        && token.split('.').count() < 3
        && !token.contains(['*', 'x', 'X']);
    if is_partial {
        return format!("{token}.*");
    }

    token.to_string()
}
