//! Property-based checks for status matching and lookups

use proptest::prelude::*;
use scan_playbook::models::{HttpMethod, HttpRequest, HttpResponse, PlaybookResponse};
use scan_playbook::variables::extract::extract_by_json_pointer;
use scan_playbook::variables::status::status_key_matches;
use scan_playbook::variables::{match_responses, status_category, ResponseRuleSet, ResponseRules};
use serde_json::json;

fn rules(keys: &[&str]) -> ResponseRules {
    keys.iter().map(|k| (*k, ResponseRuleSet::new())).collect()
}

proptest! {
    #[test]
    fn status_category_follows_hundreds_digit(code in 100u16..600) {
        prop_assert_eq!(status_category(code), format!("{}XX", code / 100));
    }

    #[test]
    fn status_category_default_outside_range(code in prop_oneof![0u16..100, 600u16..=u16::MAX]) {
        prop_assert_eq!(status_category(code), "default");
    }

    #[test]
    fn literal_code_always_follows_its_class(code in 100u16..600) {
        let literal = code.to_string();
        let class = status_category(code);
        let rules = rules(&[literal.as_str(), "default", class]);
        let response = PlaybookResponse::Live(HttpResponse::new(code));

        let keys: Vec<&str> = match_responses(&rules, &response).into_iter().map(|(k, _)| k).collect();
        prop_assert_eq!(keys, vec![class, literal.as_str()]);
    }

    #[test]
    fn mock_matches_any_key(key in "[0-9A-Za-z]{1,8}") {
        prop_assert!(status_key_matches(&key, &PlaybookResponse::Mock));
    }

    #[test]
    fn request_header_lookup_ignores_case(name in "[A-Za-z][A-Za-z0-9-]{0,15}", value in "[ -~]{0,32}") {
        let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/")
            .with_header(name.clone(), value.clone());

        prop_assert_eq!(request.header(&name.to_uppercase()), Some(value.as_str()));
        prop_assert_eq!(request.header(&name.to_lowercase()), Some(value.as_str()));
    }

    #[test]
    fn pointer_finds_every_object_member(key in "[a-z~/]{1,10}", value in any::<i64>()) {
        let body = json!({ (key.clone()): value }).to_string();
        let pointer = format!("/{}", key.replace('~', "~0").replace('/', "~1"));

        prop_assert_eq!(extract_by_json_pointer(&body, &pointer), Ok(json!(value)));
    }
}
