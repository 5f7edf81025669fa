//! Data models for a completed playbook exchange.
//!
//! These are the inputs handed over by the HTTP collaborator once a playbook
//! step has run: the request that was sent, the response that came back, and
//! the parameter values that were substituted into the request.

pub mod parameters;
pub mod request;
pub mod response;

pub use parameters::{Parameter, ParameterValues};
pub use request::{HttpMethod, HttpRequest};
pub use response::{HttpResponse, PlaybookResponse};
