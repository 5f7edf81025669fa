//! Matching response rule sets against a response status code.
//!
//! A rule set is keyed by a literal status code (`"404"`), a status class
//! (`"4XX"`), or `"default"`. Several keys may match one response; all of them
//! apply, in this order:
//!
//! 1. `default`
//! 2. `1XX`, `2XX`, `3XX`, `4XX`, `5XX`
//! 3. literal codes, ascending
//! 4. any other key, in declaration order
//!
//! Later rule sets produce later environment layers, which shadow earlier ones.

use super::rule::{ResponseRuleSet, ResponseRules};
use crate::models::PlaybookResponse;
use regex::Regex;
use std::sync::LazyLock;

static STATUS_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-5])XX$").expect("Failed to compile status class regex"));

/// Maps a status code to its class key.
///
/// Codes outside 100–599 map to `"default"`.
///
/// # Examples
///
/// ```
/// use scan_playbook::variables::status::status_category;
///
/// assert_eq!(status_category(404), "4XX");
/// assert_eq!(status_category(600), "default");
/// ```
pub fn status_category(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1XX",
        200..=299 => "2XX",
        300..=399 => "3XX",
        400..=499 => "4XX",
        500..=599 => "5XX",
        _ => "default",
    }
}

/// Sort rank of a status key. Derived ordering follows declaration order of
/// the variants, then the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum StatusKeyRank {
    Default,
    Class(u8),
    Code(u16),
    Other,
}

fn rank(key: &str) -> StatusKeyRank {
    if key == "default" {
        return StatusKeyRank::Default;
    }

    if let Some(digit) = STATUS_CLASS_REGEX
        .captures(key)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
    {
        return StatusKeyRank::Class(digit);
    }

    match key.parse::<u16>() {
        Ok(code) => StatusKeyRank::Code(code),
        Err(_) => StatusKeyRank::Other,
    }
}

/// Returns true if the rule set stored under `key` applies to `response`.
///
/// Every key applies to a mock response.
pub fn status_key_matches(key: &str, response: &PlaybookResponse) -> bool {
    response.live().map_or(true, |response| {
        response.status_code.to_string() == key || status_category(response.status_code) == key
    })
}

/// Selects the rule sets that apply to `response`, in precedence order.
pub fn match_responses<'a>(
    rules: &'a ResponseRules,
    response: &PlaybookResponse,
) -> Vec<(&'a str, &'a ResponseRuleSet)> {
    let mut matched: Vec<(&str, &ResponseRuleSet)> = rules
        .iter()
        .filter(|(key, _)| status_key_matches(key, response))
        .collect();

    // Stable: keys of equal rank keep declaration order.
    matched.sort_by_key(|(key, _)| rank(key));
    matched
}
