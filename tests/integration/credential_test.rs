//! Credential selection against OpenAPI 3 and Swagger 2 security schemes

use scan_playbook::auth::{
    check_credential, find_credentials, render_credential_value, Credential, ResolvedSecurityRequirement,
    SecurityScheme,
};
use scan_playbook::variables::OrderedMap;
use serde_json::json;

fn stored_credentials() -> OrderedMap<Credential> {
    serde_json::from_value(json!({
        "api-key": {
            "type": "apiKey",
            "in": "header",
            "name": "X-API-Key",
            "default": "tenant-a",
            "methods": {
                "tenant-a": {"credential": "key-a"},
                "tenant-b": {"credential": "key-b"}
            }
        },
        "basic-auth": {
            "type": "basic",
            "default": "admin",
            "methods": {"admin": {"credential": "admin:s3cret"}}
        },
        "access-token": {
            "type": "bearer",
            "default": "user",
            "methods": {"user": {"credential": "eyJ.user"}}
        }
    }))
    .expect("credential document should deserialize")
}

fn scheme(document: serde_json::Value) -> SecurityScheme {
    serde_json::from_value(document).expect("scheme should deserialize")
}

#[test]
fn test_openapi3_bearer_scheme() {
    let bearer = scheme(json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}));
    let credentials = stored_credentials();

    assert!(check_credential(credentials.get("access-token").unwrap(), &bearer));
    assert!(!check_credential(credentials.get("api-key").unwrap(), &bearer));

    // Any `http` scheme accepts a basic credential when neither declares `in`.
    assert!(check_credential(credentials.get("basic-auth").unwrap(), &bearer));
}

#[test]
fn test_bearer_without_location_matches_header_scheme() {
    let credential = Credential::new("bearer", None);
    let scheme = scheme(json!({"type": "http", "scheme": "bearer", "in": "header"}));
    assert!(check_credential(&credential, &scheme));

    let capitalized = SecurityScheme::new("http", Some("header")).with_scheme("Bearer");
    assert!(!check_credential(&credential, &capitalized));
}

#[test]
fn test_api_key_location_must_agree() {
    let query_key = Credential::new("apiKey", Some("query"));
    let header_scheme = scheme(json!({"type": "apiKey", "in": "header", "name": "X-API-Key"}));
    assert!(!check_credential(&query_key, &header_scheme));
}

#[test]
fn test_swagger2_basic_scheme() {
    let swagger_basic = scheme(json!({"type": "basic"}));
    let credentials = stored_credentials();
    assert!(check_credential(credentials.get("basic-auth").unwrap(), &swagger_basic));
}

#[test]
fn test_requirement_with_two_schemes() {
    let requirement: ResolvedSecurityRequirement = serde_json::from_value(json!({
        "ApiKeyAuth": {"type": "apiKey", "in": "header", "name": "X-API-Key"},
        "BasicAuth": {"type": "http", "scheme": "basic"}
    }))
    .unwrap();

    let result = find_credentials(&stored_credentials(), &requirement);
    assert!(result.is_satisfied());
    assert_eq!(result.candidates.get("ApiKeyAuth"), Some(&vec!["api-key".to_string()]));
    assert_eq!(result.candidates.get("BasicAuth"), Some(&vec!["basic-auth".to_string()]));
}

#[test]
fn test_unsatisfied_requirement() {
    let requirement: ResolvedSecurityRequirement = serde_json::from_value(json!({
        "OAuth": {"type": "oauth2", "flows": {}}
    }))
    .unwrap();

    let result = find_credentials(&stored_credentials(), &requirement);
    assert!(!result.is_satisfied());
    assert_eq!(result.unsatisfied(), vec!["OAuth"]);
}

#[test]
fn test_render_default_methods() {
    let credentials = stored_credentials();

    let rendered: Vec<String> = credentials
        .iter()
        .map(|(_, credential)| {
            let secret = &credential.default_method().unwrap().credential;
            render_credential_value(&credential.kind, secret)
        })
        .collect();

    assert_eq!(
        rendered,
        vec![
            "key-a".to_string(),
            "Basic YWRtaW46czNjcmV0".to_string(),
            "Bearer eyJ.user".to_string(),
        ]
    );
}
