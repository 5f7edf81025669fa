//! Playbook variable binding and credential resolution.
//!
//! A playbook is an ordered list of HTTP operations run during an API
//! security scan. Values captured from one operation feed the parameters of
//! later ones, and operations that declare security requirements need a
//! stored credential that satisfies them.
//!
//! # Architecture
//!
//! - **models**: HTTP exchange types and parameter values
//! - **variables**: assignment rules, status-key matching, value extraction
//! - **environment**: layered environments produced from one exchange
//! - **auth**: matching stored credentials against security schemes
//! - **config**: engine settings
//!
//! # Failure model
//!
//! A value that is simply absent (a missing header, a JSON Pointer that
//! resolves to nothing) is recorded as an [`AssignmentFailure`] and the
//! remaining rules still run. Malformed input, such as a response body that
//! is not JSON or a rule the engine does not understand, fails the whole call
//! with an [`AssignError`].
//!
//! # Example
//!
//! ```
//! use scan_playbook::{assign_variables, ResponseRules};
//! use scan_playbook::models::{HttpMethod, HttpRequest, HttpResponse, ParameterValues, PlaybookResponse};
//! use serde_json::json;
//!
//! let rules: ResponseRules = serde_json::from_value(json!({
//!     "200": {
//!         "expectations": {"httpStatus": 200},
//!         "variableAssignments": {
//!             "token": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/token"}}
//!         }
//!     }
//! })).unwrap();
//!
//! let request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/login");
//! let response = PlaybookResponse::Live(HttpResponse::new(200).with_body(r#"{"token": "abc"}"#));
//!
//! let stack = assign_variables("login", Some(&rules), &request, &response, &ParameterValues::new()).unwrap();
//! assert_eq!(stack.flatten().get("token"), Some(&json!("abc")));
//! ```

pub mod auth;
pub mod config;
pub mod environment;
pub mod error;
pub mod models;
pub mod util;
pub mod variables;

pub use auth::{check_credential, find_credentials, Credential, RequirementMatch, SecurityScheme};
pub use config::{load_config, PlaybookConfig};
pub use environment::{
    assign_variables, failed_assignments, Assigner, AssignmentFailure, AssignmentOutcome, Environment,
    EnvironmentLayer, EnvironmentStack,
};
pub use error::{AssignError, ExtractError, VariableError};
pub use variables::{ResponseRuleSet, ResponseRules, VariableAssignment};
