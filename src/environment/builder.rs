//! Building one environment layer from one matched rule set.

use super::models::{AssignmentFailure, AssignmentOutcome, Environment, EnvironmentLayer};
use crate::config::PlaybookConfig;
use crate::error::{ExtractError, VariableError};
use crate::models::{HttpRequest, ParameterValues, PlaybookResponse};
use crate::variables::extract::extract_value;
use crate::variables::rule::ResponseRuleSet;

/// Runs every assignment rule of `rule_set`, in declaration order.
///
/// A value that is simply absent is recorded as a failed outcome and the
/// remaining rules still run. A structural failure stops the layer and is
/// returned with the variable name and layer id attached.
pub fn build_layer(
    id: &str,
    rule_set: &ResponseRuleSet,
    request: &HttpRequest,
    response: &PlaybookResponse,
    parameters: &ParameterValues,
    config: &PlaybookConfig,
) -> Result<EnvironmentLayer, VariableError> {
    let mut env = Environment::new();
    let mut assignments = Vec::with_capacity(rule_set.variable_assignments.len());

    for (name, assignment) in rule_set.variable_assignments.iter() {
        match extract_value(assignment, request, response, parameters, config) {
            Ok(value) => {
                env.set(name, value.clone());
                assignments.push(AssignmentOutcome::Assigned {
                    name: name.to_string(),
                    value,
                });
            }
            Err(e) if is_soft(&e, config) => {
                tracing::debug!(context = id, variable = name, error = %e, "variable not assigned");
                assignments.push(AssignmentOutcome::Failed(AssignmentFailure {
                    name: name.to_string(),
                    error: e.to_string(),
                    assignment: assignment.clone(),
                }));
            }
            Err(e) => {
                return Err(VariableError {
                    variable: name.to_string(),
                    context: id.to_string(),
                    source: e,
                });
            }
        }
    }

    Ok(EnvironmentLayer {
        id: id.to_string(),
        env,
        assignments,
    })
}

fn is_soft(error: &ExtractError, config: &PlaybookConfig) -> bool {
    error.is_not_found() && !(config.strict_lookups && error.is_lookup_miss())
}
