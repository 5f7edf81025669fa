//! Error types for the variable-assignment pipeline.
//!
//! Extraction failures come in two tiers. A *not found* failure means the
//! exchange simply did not contain the requested value; it is recorded as data
//! on the layer and never stops sibling extractions. Every other failure is
//! structural (unparsable body, malformed selector, unsupported rule) and
//! aborts construction of the layer and of the whole stack.

use crate::variables::rule::Source;
use thiserror::Error;

/// Error produced by a single extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The chosen body could not be parsed as JSON.
    #[error("Failed to extract value using {kind} \"{selector}\": {message}")]
    InvalidJson {
        kind: SelectorKind,
        selector: String,
        message: String,
    },

    /// The JSON Pointer is not a valid RFC 6901 pointer.
    #[error("Invalid JSON Pointer \"{0}\": must be empty or start with '/'")]
    InvalidPointer(String),

    /// The JSON Path expression could not be parsed.
    #[error("Failed to extract value using JSON Path \"{path}\": {message}")]
    InvalidPath { path: String, message: String },

    /// The rule combines a location and a source that cannot be extracted.
    #[error("unsupported assignment: from {from} in {location}")]
    Unsupported { from: String, location: String },

    /// The JSON Pointer resolved to nothing.
    #[error("JSON Pointer \"{0}\" did not resolve to a value")]
    PointerNotFound(String),

    /// The JSON Path expression matched nothing.
    #[error("JSON Path \"{0}\" did not match any value")]
    PathNotFound(String),

    #[error("Failed to find {side} header name: {name}")]
    HeaderNotFound { side: Source, name: String },

    #[error("Failed to find {side} cookie name: {name}")]
    CookieNotFound { side: Source, name: String },

    #[error("Failed to find request {location} parameter name: {name}")]
    ParameterNotFound { location: String, name: String },
}

impl ExtractError {
    /// Returns true when the failure only means the value is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExtractError::PointerNotFound(_)
                | ExtractError::PathNotFound(_)
                | ExtractError::HeaderNotFound { .. }
                | ExtractError::CookieNotFound { .. }
                | ExtractError::ParameterNotFound { .. }
        )
    }

    /// Returns true for misses of a named header, cookie or parameter.
    ///
    /// Strict lookup mode promotes exactly these misses to hard failures.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            ExtractError::HeaderNotFound { .. }
                | ExtractError::CookieNotFound { .. }
                | ExtractError::ParameterNotFound { .. }
        )
    }
}

/// The selector syntax a body rule uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    JsonPointer,
    JsonPath,
}

impl std::fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorKind::JsonPointer => write!(f, "JSON Pointer"),
            SelectorKind::JsonPath => write!(f, "JSON Path"),
        }
    }
}

/// Hard failure while building one environment layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to extract value for variable '{variable}' in context '{context}': {source}")]
pub struct VariableError {
    pub variable: String,
    pub context: String,
    #[source]
    pub source: ExtractError,
}

/// Hard failure while assembling the environment stack for one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to assign variables for response code: {code}: {source}")]
pub struct AssignError {
    pub code: String,
    #[source]
    pub source: VariableError,
}
