//! Variable assignment rules and value extraction.
//!
//! This module covers everything below the environment layer: the rule
//! documents themselves, status-key matching, cookie parsing, and extraction
//! of a single value from an exchange.

pub mod cookie;
pub mod extract;
pub mod ordered_map;
pub mod rule;
pub mod status;

pub use extract::extract_value;
pub use ordered_map::OrderedMap;
pub use rule::{BodySelector, ResponseRuleSet, ResponseRules, Source, VariableAssignment};
pub use status::{match_responses, status_category};
