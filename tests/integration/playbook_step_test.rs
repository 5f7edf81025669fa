//! End-to-end variable assignment for playbook steps
//!
//! Rule documents are written in the scan-configuration JSON shape and run
//! through the public API the way a playbook runner would.

use super::{json_response, login_request, rules_from_json};

use scan_playbook::config::load_config;
use scan_playbook::models::{HttpMethod, HttpRequest, HttpResponse, ParameterValues, PlaybookResponse};
use scan_playbook::{assign_variables, failed_assignments, Assigner, AssignmentOutcome, VariableAssignment};
use serde_json::json;

#[test]
fn test_login_step_binds_token_from_body_header_and_cookie() {
    let rules = rules_from_json(json!({
        "200": {
            "expectations": {"httpStatus": 200},
            "variableAssignments": {
                "accessToken": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/auth/token"}},
                "firstRole": {"in": "body", "from": "request", "path": {"type": "jsonPath", "value": "$.roles[0]"}},
                "requestId": {"in": "header", "from": "response", "name": "x-request-id"},
                "session": {"in": "cookie", "from": "request", "name": "session"},
                "refresh": {"in": "cookie", "from": "response", "name": "refresh"}
            }
        }
    }));

    let response = PlaybookResponse::Live(
        HttpResponse::new(200)
            .with_header("X-Request-Id", "req-77")
            .with_header("Set-Cookie", "refresh=r-456; Path=/; HttpOnly")
            .with_body(r#"{"auth": {"token": "eyJ.abc", "expires": 3600}}"#),
    );

    let stack = assign_variables("login", Some(&rules), &login_request(), &response, &ParameterValues::new())
        .expect("assignment should succeed");

    assert_eq!(stack.len(), 1);
    let layer = &stack.layers()[0];
    assert_eq!(layer.id, "login-200");
    assert_eq!(layer.env.get("accessToken"), Some(&json!("eyJ.abc")));
    assert_eq!(layer.env.get("firstRole"), Some(&json!("reader")));
    assert_eq!(layer.env.get("requestId"), Some(&json!("req-77")));
    assert_eq!(layer.env.get("session"), Some(&json!("s-123")));
    assert_eq!(layer.env.get("refresh"), Some(&json!("r-456")));

    let names: Vec<&str> = layer.assignments.iter().map(AssignmentOutcome::name).collect();
    assert_eq!(names, vec!["accessToken", "firstRole", "requestId", "session", "refresh"]);
    assert!(failed_assignments(&stack).is_empty());
}

#[test]
fn test_range_key_precedes_literal_code() {
    let rules = rules_from_json(json!({
        "404": {
            "variableAssignments": {
                "reason": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/reason"}}
            }
        },
        "4XX": {
            "variableAssignments": {
                "reason": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/error"}}
            }
        },
        "default": {
            "variableAssignments": {
                "reason": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/error"}}
            }
        }
    }));

    let response = json_response(404, r#"{"error": "generic", "reason": "no such pet"}"#);
    let stack = assign_variables("get-pet", Some(&rules), &login_request(), &response, &ParameterValues::new())
        .unwrap();

    let ids: Vec<&str> = stack.layers().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["get-pet-4XX", "get-pet-404"]);
    assert_eq!(stack.flatten().get("reason"), Some(&json!("no such pet")));
}

#[test]
fn test_unmatched_status_yields_empty_stack() {
    let rules = rules_from_json(json!({
        "2XX": {
            "variableAssignments": {
                "id": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/id"}}
            }
        }
    }));

    let stack = assign_variables("step", Some(&rules), &login_request(), &json_response(500, "boom"), &ParameterValues::new())
        .unwrap();
    assert!(stack.is_empty());
}

#[test]
fn test_default_key_covers_out_of_range_status() {
    let rules = rules_from_json(json!({
        "default": {
            "variableAssignments": {
                "code": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/code"}}
            }
        }
    }));

    let stack = assign_variables("odd", Some(&rules), &login_request(), &json_response(999, r#"{"code": 9}"#), &ParameterValues::new())
        .unwrap();
    assert_eq!(stack.layers()[0].id, "odd-default");
    assert_eq!(stack.flatten().get("code"), Some(&json!(9)));
}

#[test]
fn test_malformed_body_aborts_step() {
    let rules = rules_from_json(json!({
        "200": {
            "variableAssignments": {
                "etag": {"in": "header", "from": "response", "name": "ETag"},
                "id": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/id"}}
            }
        }
    }));

    let err = assign_variables("create", Some(&rules), &login_request(), &json_response(200, "<html>"), &ParameterValues::new())
        .unwrap_err();

    assert_eq!(err.code, "200");
    assert_eq!(err.source.variable, "id");
    assert_eq!(err.source.context, "create-200");
    assert!(err.to_string().contains("Failed to extract value using JSON Pointer \"/id\""));
}

#[test]
fn test_missing_values_are_reported_not_raised() {
    let rules = rules_from_json(json!({
        "201": {
            "variableAssignments": {
                "id": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/id"}},
                "location": {"in": "header", "from": "response", "name": "Location"},
                "nickname": {"in": "body", "from": "response", "path": {"type": "jsonPath", "value": "$.profile.nickname"}}
            }
        }
    }));

    let stack = assign_variables("create", Some(&rules), &login_request(), &json_response(201, r#"{"id": 5}"#), &ParameterValues::new())
        .unwrap();

    assert_eq!(stack.flatten().get("id"), Some(&json!(5)));

    let failed = failed_assignments(&stack);
    let names: Vec<&str> = failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["location", "nickname"]);
    assert_eq!(failed[0].error, "Failed to find response header name: Location");
    assert_eq!(failed[0].assignment, VariableAssignment::header(scan_playbook::variables::Source::Response, "Location"));
}

#[test]
fn test_request_parameters_feed_assignments() {
    let rules = rules_from_json(json!({
        "2XX": {
            "variableAssignments": {
                "page": {"in": "query", "from": "request", "name": "page"},
                "petId": {"in": "path", "from": "request", "name": "petId"}
            }
        }
    }));

    let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/pets/31?page=4");
    let parameters = ParameterValues::new().with_query("page", "4").with_path("petId", 31);

    let stack = assign_variables("get-pet", Some(&rules), &request, &json_response(200, "{}"), &parameters).unwrap();
    assert_eq!(stack.flatten().get("page"), Some(&json!("4")));
    assert_eq!(stack.flatten().get("petId"), Some(&json!(31)));
}

#[test]
fn test_query_from_response_is_rejected() {
    let rules = rules_from_json(json!({
        "200": {
            "variableAssignments": {
                "bogus": {"in": "query", "from": "response", "name": "page"}
            }
        }
    }));

    let err = assign_variables("step", Some(&rules), &login_request(), &json_response(200, "{}"), &ParameterValues::new())
        .unwrap_err();
    assert!(err.to_string().contains("unsupported assignment: from response in query"));
}

#[test]
fn test_mock_run_validates_every_rule_set() {
    let rules = rules_from_json(json!({
        "200": {
            "variableAssignments": {
                "token": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/token"}}
            }
        },
        "401": {
            "variableAssignments": {
                "challenge": {"in": "header", "from": "response", "name": "WWW-Authenticate"}
            }
        }
    }));

    let stack = assign_variables("login", Some(&rules), &login_request(), &PlaybookResponse::Mock, &ParameterValues::new())
        .unwrap();

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.flatten().get("token"), Some(&json!("foo")));
    assert_eq!(stack.flatten().get("challenge"), Some(&json!("foo")));
}

#[test]
fn test_strict_lookups_from_settings() {
    let config = load_config(Some(json!({"playbook": {"strictLookups": true}}))).unwrap();
    let assigner = Assigner::with_config(config);

    let rules = rules_from_json(json!({
        "200": {
            "variableAssignments": {
                "etag": {"in": "header", "from": "response", "name": "ETag"}
            }
        }
    }));

    let err = assigner
        .assign("strict", Some(&rules), &login_request(), &json_response(200, "{}"), &ParameterValues::new())
        .unwrap_err();
    assert_eq!(err.source.variable, "etag");
}

#[test]
fn test_stack_serializes_for_reporting() {
    let rules = rules_from_json(json!({
        "200": {
            "variableAssignments": {
                "id": {"in": "body", "from": "response", "path": {"type": "jsonPointer", "value": "/id"}},
                "etag": {"in": "header", "from": "response", "name": "ETag"}
            }
        }
    }));

    let stack = assign_variables("step", Some(&rules), &login_request(), &json_response(200, r#"{"id": 1}"#), &ParameterValues::new())
        .unwrap();

    let report = serde_json::to_value(&stack).unwrap();
    assert_eq!(report[0]["id"], json!("step-200"));
    assert_eq!(report[0]["env"], json!({"id": 1}));
    assert_eq!(report[0]["assignments"][0], json!({"name": "id", "value": 1}));
    assert_eq!(report[0]["assignments"][1]["name"], json!("etag"));
    assert_eq!(
        report[0]["assignments"][1]["assignment"],
        json!({"in": "header", "from": "response", "name": "ETag"})
    );
}
