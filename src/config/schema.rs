//! Configuration schema for variable assignment.
//!
//! This module defines the user-configurable knobs of the assignment pipeline
//! and their validation logic.

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Settings for the variable-assignment pipeline.
///
/// Read from the `"playbook"` key of a settings object. Missing settings fall
/// back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookConfig {
    /// Value every extraction yields when rules are validated against a mock
    /// response. Defaults to `"foo"`.
    #[serde(default = "default_mock_placeholder")]
    pub mock_placeholder: String,

    /// Treat a missing header, cookie or parameter as a hard failure.
    ///
    /// When disabled (the default) such misses are recorded as soft "not
    /// found" outcomes like any other absent value. JSON Pointer and JSON Path
    /// misses are always soft.
    #[serde(default)]
    pub strict_lookups: bool,

    /// Separator between pairs of a `Cookie` request header.
    ///
    /// Defaults to `"; "`. Must not be empty.
    #[serde(default = "default_request_cookie_separator")]
    pub request_cookie_separator: String,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            mock_placeholder: default_mock_placeholder(),
            strict_lookups: false,
            request_cookie_separator: default_request_cookie_separator(),
        }
    }
}

impl PlaybookConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_cookie_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "requestCookieSeparator must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Merges this configuration with another, using values from `other`.
    pub fn merge(&self, other: &PlaybookConfig) -> Self {
        Self {
            mock_placeholder: other.mock_placeholder.clone(),
            strict_lookups: other.strict_lookups,
            request_cookie_separator: other.request_cookie_separator.clone(),
        }
    }
}

fn default_mock_placeholder() -> String {
    "foo".to_string()
}

fn default_request_cookie_separator() -> String {
    "; ".to_string()
}
