//! Environment data models for playbook variable assignment.
//!
//! One HTTP exchange produces an [`EnvironmentStack`]: one
//! [`EnvironmentLayer`] per matching response rule set, each holding the
//! variables it extracted plus a record of every assignment it attempted.

use crate::variables::rule::VariableAssignment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Named variables extracted from one exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a variable value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Sets a variable, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variables.iter()
    }
}

/// A variable that could not be assigned because its value was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentFailure {
    pub name: String,
    pub error: String,
    pub assignment: VariableAssignment,
}

/// Result of one assignment rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignmentOutcome {
    Assigned { name: String, value: Value },
    Failed(AssignmentFailure),
}

impl AssignmentOutcome {
    pub fn name(&self) -> &str {
        match self {
            AssignmentOutcome::Assigned { name, .. } => name,
            AssignmentOutcome::Failed(failure) => &failure.name,
        }
    }

    pub fn failure(&self) -> Option<&AssignmentFailure> {
        match self {
            AssignmentOutcome::Assigned { .. } => None,
            AssignmentOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// Variables produced by one matched rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentLayer {
    /// Correlation id, `<step id>-<status key>`. Diagnostic only.
    pub id: String,
    pub env: Environment,
    /// One outcome per rule, in rule order.
    pub assignments: Vec<AssignmentOutcome>,
}

/// Ordered layers for one exchange. Later layers shadow earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentStack {
    layers: Vec<EnvironmentLayer>,
}

impl EnvironmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: EnvironmentLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[EnvironmentLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Every soft failure across all layers, in stack order.
    pub fn failed_assignments(&self) -> Vec<&AssignmentFailure> {
        self.layers
            .iter()
            .flat_map(|layer| layer.assignments.iter())
            .filter_map(AssignmentOutcome::failure)
            .collect()
    }

    /// Collapses the stack into one environment; a name set by a later layer
    /// replaces the value from an earlier one.
    pub fn flatten(&self) -> Environment {
        let mut env = Environment::new();
        for layer in &self.layers {
            for (name, value) in layer.env.iter() {
                env.set(name.clone(), value.clone());
            }
        }
        env
    }
}

impl IntoIterator for EnvironmentStack {
    type Item = EnvironmentLayer;
    type IntoIter = std::vec::IntoIter<EnvironmentLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
