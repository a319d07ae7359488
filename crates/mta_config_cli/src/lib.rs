//! `mta-config` CLI library exports for integration testing.
//!
//! This module exposes command implementations for use in tests and by the
//! binary.

pub mod commands;
pub mod config;
pub mod errors;

/// Parse a `KEY=VALUE` command-line argument.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
