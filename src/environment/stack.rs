//! Assembling the environment stack for one playbook step.

use super::builder::build_layer;
use super::models::{AssignmentFailure, EnvironmentStack};
use crate::config::PlaybookConfig;
use crate::error::AssignError;
use crate::models::{HttpRequest, ParameterValues, PlaybookResponse};
use crate::variables::rule::ResponseRules;
use crate::variables::status::match_responses;

/// Runs variable assignment with a fixed configuration.
///
/// An `Assigner` holds no state besides its configuration and can be shared
/// freely between concurrently running playbook steps.
#[derive(Debug, Clone, Default)]
pub struct Assigner {
    config: PlaybookConfig,
}

impl Assigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlaybookConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlaybookConfig {
        &self.config
    }

    /// Builds the environment stack for one exchange.
    ///
    /// `rules` is the step's response rule mapping; `None` means the step
    /// declares no assignments and yields an empty stack. Each rule set whose
    /// status key matches the response contributes one layer, in status-key
    /// precedence order. The first structural failure aborts the whole call.
    pub fn assign(
        &self,
        id: &str,
        rules: Option<&ResponseRules>,
        request: &HttpRequest,
        response: &PlaybookResponse,
        parameters: &ParameterValues,
    ) -> Result<EnvironmentStack, AssignError> {
        let mut stack = EnvironmentStack::new();

        let Some(rules) = rules else {
            return Ok(stack);
        };

        for (code, rule_set) in match_responses(rules, response) {
            let layer_id = format!("{}-{}", id, code);
            tracing::debug!(step = id, code, rules = rule_set.variable_assignments.len(), "assigning variables");

            let layer = build_layer(&layer_id, rule_set, request, response, parameters, &self.config)
                .map_err(|source| {
                    tracing::warn!(step = id, code, error = %source, "variable assignment failed");
                    AssignError {
                        code: code.to_string(),
                        source,
                    }
                })?;

            stack.push(layer);
        }

        Ok(stack)
    }
}

/// Builds the environment stack for one exchange with default configuration.
///
/// # Examples
///
/// ```
/// use scan_playbook::{assign_variables, failed_assignments};
/// use scan_playbook::models::{HttpMethod, HttpRequest, HttpResponse, ParameterValues, PlaybookResponse};
/// use scan_playbook::variables::rule::ResponseRules;
/// use serde_json::json;
///
/// let rules: ResponseRules = serde_json::from_value(json!({
///     "2XX": {
///         "variableAssignments": {
///             "userId": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/id"}},
///             "etag": {"in": "header", "from": "response", "name": "ETag"}
///         }
///     }
/// })).unwrap();
///
/// let request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/users");
/// let response = PlaybookResponse::Live(HttpResponse::new(201).with_body(r#"{"id": 42}"#));
///
/// let stack = assign_variables("create-user", Some(&rules), &request, &response, &ParameterValues::new()).unwrap();
/// assert_eq!(stack.layers()[0].id, "create-user-2XX");
/// assert_eq!(stack.layers()[0].env.get("userId"), Some(&json!(42)));
/// assert_eq!(failed_assignments(&stack)[0].name, "etag");
/// ```
pub fn assign_variables(
    id: &str,
    rules: Option<&ResponseRules>,
    request: &HttpRequest,
    response: &PlaybookResponse,
    parameters: &ParameterValues,
) -> Result<EnvironmentStack, AssignError> {
    Assigner::new().assign(id, rules, request, response, parameters)
}

/// Every soft failure in the stack, for surfacing as step warnings.
pub fn failed_assignments(stack: &EnvironmentStack) -> Vec<&AssignmentFailure> {
    stack.failed_assignments()
}
