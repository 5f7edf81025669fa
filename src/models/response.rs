//! HTTP response side of a completed playbook exchange.
//!
//! Response headers are kept as an ordered list of `(name, value)` pairs rather
//! than a map, because a server may legitimately repeat a header name. The
//! common case is several `Set-Cookie` lines, each carrying its own cookie.

use serde::{Deserialize, Serialize};

/// Represents an HTTP response received for a playbook step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Human-readable status text, if the collaborator recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Response headers in the order they were received. Duplicates are kept.
    #[serde(default)]
    pub headers: Vec<(String, String)>,

    /// Raw response body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpResponse {
    /// Creates a response with the given status code, no headers and no body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            status_message: None,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header. Existing headers with the same name are kept.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Builder-style variant of [`HttpResponse::add_header`].
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Builder-style body setter.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Iterates over the values of every header whose name matches `name`,
    /// ignoring ASCII case, in received order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The response a playbook step is evaluated against.
///
/// `Mock` stands in for a response when rule wiring is validated without a
/// live exchange: every status key matches it, and every extraction against
/// it succeeds with a placeholder value.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybookResponse {
    Live(HttpResponse),
    Mock,
}

impl PlaybookResponse {
    /// Returns the live response, or `None` in mock mode.
    pub fn live(&self) -> Option<&HttpResponse> {
        match self {
            PlaybookResponse::Live(response) => Some(response),
            PlaybookResponse::Mock => None,
        }
    }
}

impl From<HttpResponse> for PlaybookResponse {
    fn from(response: HttpResponse) -> Self {
        PlaybookResponse::Live(response)
    }
}
