//! Resolved request parameter values, grouped by location.
//!
//! Each location is an ordered list rather than a map: query strings may
//! repeat a key, and lookups take the first occurrence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One resolved parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parameter values the scan engine substituted into a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterValues {
    #[serde(default)]
    pub query: Vec<Parameter>,
    #[serde(default)]
    pub path: Vec<Parameter>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push(Parameter::new(key, value));
        self
    }

    pub fn with_path(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path.push(Parameter::new(key, value));
        self
    }
}

/// Finds the first parameter whose key equals `name` exactly.
pub fn find_parameter<'a>(parameters: &'a [Parameter], name: &str) -> Option<&'a Value> {
    parameters.iter().find(|p| p.key == name).map(|p| &p.value)
}
