//! Matching stored credentials against declared security schemes.
//!
//! Security schemes come from either OpenAPI 3 (`type: http` with a
//! `scheme`) or Swagger 2 (`type: basic`). [`check_credential`] reconciles
//! both vocabularies with the small set of credential kinds a scan
//! configuration can hold.

pub mod basic;
pub mod bearer;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::variables::OrderedMap;

/// One secret value usable with a credential, e.g. a user's token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialMethod {
    pub credential: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A stored credential as declared in the scan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Method used when a step does not pick one explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub methods: OrderedMap<CredentialMethod>,
}

impl Credential {
    pub fn new(kind: impl Into<String>, location: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            location: location.map(str::to_string),
            name: None,
            default: None,
            methods: OrderedMap::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, secret: impl Into<String>) -> Self {
        let name = name.into();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        self.methods.insert(
            name,
            CredentialMethod {
                credential: secret.into(),
                description: None,
            },
        );
        self
    }

    /// The method named by `default`, falling back to the first declared one.
    pub fn default_method(&self) -> Option<&CredentialMethod> {
        self.default
            .as_deref()
            .and_then(|name| self.methods.get(name))
            .or_else(|| self.methods.iter().next().map(|(_, method)| method))
    }
}

/// A security scheme after `$ref` resolution.
///
/// Only `type`, `in` and `scheme` take part in matching; every other field
/// of the declaration is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecurityScheme {
    pub fn new(kind: impl Into<String>, location: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            location: location.map(str::to_string),
            scheme: None,
            name: None,
            extra: Map::new(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

/// Scheme name to resolved scheme, for one entry of an operation's
/// `security` list.
pub type ResolvedSecurityRequirement = OrderedMap<SecurityScheme>;

/// Whether `credential` can satisfy `scheme`.
///
/// # Examples
///
/// ```
/// use scan_playbook::auth::{check_credential, Credential, SecurityScheme};
///
/// let token = Credential::new("bearer", None);
/// let scheme = SecurityScheme::new("http", Some("header")).with_scheme("bearer");
/// assert!(check_credential(&token, &scheme));
/// ```
pub fn check_credential(credential: &Credential, scheme: &SecurityScheme) -> bool {
    let same_location = scheme.location == credential.location;

    if scheme.kind == credential.kind && same_location {
        return true;
    }

    match (scheme.kind.as_str(), credential.kind.as_str()) {
        ("http", "basic") | ("basic", "basic") => same_location,
        ("http", "bearer") => scheme.scheme.as_deref() == Some("bearer"),
        _ => false,
    }
}

/// Candidate credentials for each scheme of a security requirement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementMatch {
    pub candidates: OrderedMap<Vec<String>>,
}

impl RequirementMatch {
    /// True when every scheme has at least one matching credential.
    pub fn is_satisfied(&self) -> bool {
        self.candidates.iter().all(|(_, names)| !names.is_empty())
    }

    /// Schemes no stored credential can satisfy.
    pub fn unsatisfied(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .filter(|(_, names)| names.is_empty())
            .map(|(scheme, _)| scheme)
            .collect()
    }
}

/// Runs [`check_credential`] for every scheme of `requirement` against every
/// stored credential, keeping declaration order on both sides.
pub fn find_credentials(
    credentials: &OrderedMap<Credential>,
    requirement: &ResolvedSecurityRequirement,
) -> RequirementMatch {
    let candidates = requirement
        .iter()
        .map(|(scheme_name, scheme)| {
            let names: Vec<String> = credentials
                .iter()
                .filter(|(_, credential)| check_credential(credential, scheme))
                .map(|(name, _)| name.to_string())
                .collect();

            if names.is_empty() {
                tracing::debug!(scheme = scheme_name, "no credential matches security scheme");
            }
            (scheme_name, names)
        })
        .collect();

    RequirementMatch { candidates }
}

/// Produces the value sent on the wire for a credential secret.
///
/// Basic secrets (`user:password`) are base64-encoded behind `Basic `,
/// bearer tokens get a `Bearer ` prefix, everything else is sent verbatim.
pub fn render_credential_value(kind: &str, secret: &str) -> String {
    match kind {
        "basic" => basic::basic_auth_from_secret(secret),
        "bearer" => bearer::bearer_token(secret),
        _ => secret.to_string(),
    }
}
