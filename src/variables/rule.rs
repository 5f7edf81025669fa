//! Variable assignment rules and the per-status-code rule sets that hold them.
//!
//! In a scan configuration a rule set looks like this:
//!
//! ```json
//! {
//!   "200": {
//!     "expectations": { "httpStatus": 200 },
//!     "variableAssignments": {
//!       "token": { "in": "body", "from": "response",
//!                  "path": { "type": "jsonPointer", "value": "/access_token" } },
//!       "session": { "in": "cookie", "from": "response", "name": "SESSIONID" }
//!     }
//!   }
//! }
//! ```
//!
//! The document shape is loosely typed (string discriminants). On the way in
//! it is folded into the closed [`VariableAssignment`] enum; any combination
//! the extractor cannot serve becomes [`VariableAssignment::Unsupported`],
//! which fails loudly at extraction time instead of silently doing nothing.

use super::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which side of the exchange a rule reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Request,
    Response,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Request => "request",
            Source::Response => "response",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "request" => Some(Source::Request),
            "response" => Some(Source::Response),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector used to address a value inside a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySelector {
    /// RFC 6901 pointer, e.g. `/items/0/id`.
    JsonPointer(String),
    /// RFC 9535 expression, e.g. `$.items[*].id`. The first match is used.
    JsonPath(String),
}

/// One declarative extraction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAssignment", into = "RawAssignment")]
pub enum VariableAssignment {
    Body { from: Source, selector: BodySelector },
    Header { from: Source, name: String },
    Cookie { from: Source, name: String },
    /// Query parameters can only be read from the request.
    Query { name: String },
    /// Path parameters can only be read from the request.
    Path { name: String },
    /// Anything else. Extraction of this variant is a hard error.
    Unsupported(RawAssignment),
}

impl VariableAssignment {
    pub fn body_pointer(from: Source, pointer: impl Into<String>) -> Self {
        VariableAssignment::Body {
            from,
            selector: BodySelector::JsonPointer(pointer.into()),
        }
    }

    pub fn body_path(from: Source, path: impl Into<String>) -> Self {
        VariableAssignment::Body {
            from,
            selector: BodySelector::JsonPath(path.into()),
        }
    }

    pub fn header(from: Source, name: impl Into<String>) -> Self {
        VariableAssignment::Header {
            from,
            name: name.into(),
        }
    }

    pub fn cookie(from: Source, name: impl Into<String>) -> Self {
        VariableAssignment::Cookie {
            from,
            name: name.into(),
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        VariableAssignment::Query { name: name.into() }
    }

    pub fn path(name: impl Into<String>) -> Self {
        VariableAssignment::Path { name: name.into() }
    }
}

/// The loosely-typed document shape of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAssignment {
    #[serde(rename = "in")]
    pub location: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<RawPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPath {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl From<RawAssignment> for VariableAssignment {
    fn from(raw: RawAssignment) -> Self {
        let from = Source::parse(&raw.from);
        let selector = raw.path.as_ref().and_then(|p| match p.kind.as_str() {
            "jsonPointer" => Some(BodySelector::JsonPointer(p.value.clone())),
            "jsonPath" => Some(BodySelector::JsonPath(p.value.clone())),
            _ => None,
        });

        let parsed = match (raw.location.as_str(), from, selector, raw.name.clone()) {
            ("body", Some(from), Some(selector), _) => Some(VariableAssignment::Body { from, selector }),
            ("header", Some(from), _, Some(name)) => Some(VariableAssignment::Header { from, name }),
            ("cookie", Some(from), _, Some(name)) => Some(VariableAssignment::Cookie { from, name }),
            ("query", Some(Source::Request), _, Some(name)) => Some(VariableAssignment::Query { name }),
            ("path", Some(Source::Request), _, Some(name)) => Some(VariableAssignment::Path { name }),
            _ => None,
        };

        parsed.unwrap_or(VariableAssignment::Unsupported(raw))
    }
}

impl From<VariableAssignment> for RawAssignment {
    fn from(assignment: VariableAssignment) -> Self {
        let named = |location: &str, from: Source, name: String| RawAssignment {
            location: location.to_string(),
            from: from.as_str().to_string(),
            name: Some(name),
            path: None,
        };

        match assignment {
            VariableAssignment::Body { from, selector } => {
                let (kind, value) = match selector {
                    BodySelector::JsonPointer(v) => ("jsonPointer", v),
                    BodySelector::JsonPath(v) => ("jsonPath", v),
                };
                RawAssignment {
                    location: "body".to_string(),
                    from: from.as_str().to_string(),
                    name: None,
                    path: Some(RawPath {
                        kind: kind.to_string(),
                        value,
                    }),
                }
            }
            VariableAssignment::Header { from, name } => named("header", from, name),
            VariableAssignment::Cookie { from, name } => named("cookie", from, name),
            VariableAssignment::Query { name } => named("query", Source::Request, name),
            VariableAssignment::Path { name } => named("path", Source::Request, name),
            VariableAssignment::Unsupported(raw) => raw,
        }
    }
}

/// The rules attached to one status key, plus whatever else the scan
/// configuration declares for that response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRuleSet {
    /// Output variable name to rule, in declaration order.
    #[serde(default)]
    pub variable_assignments: OrderedMap<VariableAssignment>,

    /// Free-form metadata (expectations and the like), kept as-is.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl ResponseRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule producing the variable `name`.
    pub fn assign(mut self, name: impl Into<String>, assignment: VariableAssignment) -> Self {
        self.variable_assignments.insert(name, assignment);
        self
    }
}

/// Status key (`"200"`, `"4XX"`, `"default"`) to rule set, in declaration order.
pub type ResponseRules = OrderedMap<ResponseRuleSet>;
