//! Layered environments built from playbook exchanges.
//!
//! After a playbook step runs, [`assign_variables`] applies the step's
//! response rules to the exchange and returns an [`EnvironmentStack`] that the
//! next step draws its parameter values from. Missing values are reported as
//! [`AssignmentFailure`]s through [`failed_assignments`]; they never fail the
//! step on their own.

pub mod builder;
pub mod models;
pub mod stack;

pub use builder::build_layer;
pub use models::{AssignmentFailure, AssignmentOutcome, Environment, EnvironmentLayer, EnvironmentStack};
pub use stack::{assign_variables, failed_assignments, Assigner};
