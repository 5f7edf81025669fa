//! Extraction of a single variable value from a completed exchange.
//!
//! Dispatch follows the rule variant:
//!
//! - body rules parse the chosen side's body as JSON and resolve a JSON
//!   Pointer (RFC 6901) or evaluate a JSON Path (RFC 9535, first match);
//! - header rules scan the chosen side's headers, ignoring case;
//! - cookie rules read `Set-Cookie` response headers or the `Cookie` request
//!   header;
//! - query and path rules look the name up in the substituted parameters.
//!
//! Every outcome is a `Result`: an absent value is an [`ExtractError`] for
//! which [`ExtractError::is_not_found`] holds, anything else is structural.

use super::cookie::{find_request_cookie, find_set_cookie};
use super::rule::{BodySelector, Source, VariableAssignment};
use crate::config::PlaybookConfig;
use crate::error::{ExtractError, SelectorKind};
use crate::models::parameters::find_parameter;
use crate::models::{HttpRequest, HttpResponse, ParameterValues, PlaybookResponse};
use serde_json::Value;
use serde_json_path::JsonPath;

/// Extracts the value a rule points at.
///
/// Against [`PlaybookResponse::Mock`] every rule succeeds with the configured
/// placeholder, so rule wiring can be checked without a live exchange.
///
/// # Examples
///
/// ```
/// use scan_playbook::config::PlaybookConfig;
/// use scan_playbook::models::{HttpMethod, HttpRequest, HttpResponse, ParameterValues, PlaybookResponse};
/// use scan_playbook::variables::extract::extract_value;
/// use scan_playbook::variables::rule::{Source, VariableAssignment};
/// use serde_json::json;
///
/// let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/items/42");
/// let response = PlaybookResponse::Live(HttpResponse::new(200).with_body(r#"{"id": 42}"#));
/// let rule = VariableAssignment::body_pointer(Source::Response, "/id");
///
/// let value = extract_value(&rule, &request, &response, &ParameterValues::new(), &PlaybookConfig::default());
/// assert_eq!(value, Ok(json!(42)));
/// ```
pub fn extract_value(
    assignment: &VariableAssignment,
    request: &HttpRequest,
    response: &PlaybookResponse,
    parameters: &ParameterValues,
    config: &PlaybookConfig,
) -> Result<Value, ExtractError> {
    let Some(response) = response.live() else {
        return Ok(Value::String(config.mock_placeholder.clone()));
    };

    let result = match assignment {
        VariableAssignment::Body { from, selector } => {
            let body = body_of(*from, request, response);
            match selector {
                BodySelector::JsonPointer(pointer) => extract_by_json_pointer(body, pointer),
                BodySelector::JsonPath(path) => extract_by_json_path(body, path),
            }
        }
        VariableAssignment::Header { from, name } => {
            let found = match from {
                Source::Request => request.header(name),
                Source::Response => response.header_values(name).next(),
            };
            found
                .map(|v| Value::String(v.to_string()))
                .ok_or_else(|| ExtractError::HeaderNotFound {
                    side: *from,
                    name: name.clone(),
                })
        }
        VariableAssignment::Cookie { from, name } => {
            let found = match from {
                Source::Request => request
                    .headers
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case("cookie"))
                    .find_map(|(_, v)| find_request_cookie(v, &config.request_cookie_separator, name)),
                Source::Response => find_set_cookie(response.header_values("set-cookie"), name),
            };
            found
                .map(|v| Value::String(v.to_string()))
                .ok_or_else(|| ExtractError::CookieNotFound {
                    side: *from,
                    name: name.clone(),
                })
        }
        VariableAssignment::Query { name } => {
            extract_parameter(&parameters.query, "query", name)
        }
        VariableAssignment::Path { name } => extract_parameter(&parameters.path, "path", name),
        VariableAssignment::Unsupported(raw) => Err(ExtractError::Unsupported {
            from: raw.from.clone(),
            location: raw.location.clone(),
        }),
    };

    tracing::trace!(?assignment, ok = result.is_ok(), "extracted variable value");
    result
}

/// Picks the body of the requested side. A missing body reads as empty,
/// which then fails JSON parsing.
fn body_of<'a>(from: Source, request: &'a HttpRequest, response: &'a HttpResponse) -> &'a str {
    let body = match from {
        Source::Request => request.body.as_deref(),
        Source::Response => response.body.as_deref(),
    };
    body.unwrap_or("")
}

fn parse_body(body: &str, kind: SelectorKind, selector: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(body).map_err(|e| ExtractError::InvalidJson {
        kind,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Resolves an RFC 6901 pointer (`~1` is `/`, `~0` is `~`) against a JSON body.
pub fn extract_by_json_pointer(body: &str, pointer: &str) -> Result<Value, ExtractError> {
    let json = parse_body(body, SelectorKind::JsonPointer, pointer)?;

    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(ExtractError::InvalidPointer(pointer.to_string()));
    }

    json.pointer(pointer)
        .cloned()
        .ok_or_else(|| ExtractError::PointerNotFound(pointer.to_string()))
}

/// Evaluates a JSON Path expression against a JSON body and returns the
/// first match.
pub fn extract_by_json_path(body: &str, path: &str) -> Result<Value, ExtractError> {
    let json = parse_body(body, SelectorKind::JsonPath, path)?;

    let compiled = JsonPath::parse(path).map_err(|e| ExtractError::InvalidPath {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    compiled
        .query(&json)
        .first()
        .cloned()
        .ok_or_else(|| ExtractError::PathNotFound(path.to_string()))
}

fn extract_parameter(
    parameters: &[crate::models::Parameter],
    location: &str,
    name: &str,
) -> Result<Value, ExtractError> {
    find_parameter(parameters, name)
        .cloned()
        .ok_or_else(|| ExtractError::ParameterNotFound {
            location: location.to_string(),
            name: name.to_string(),
        })
}
