//! Cookie parsing for cookie-based variable assignments.
//!
//! Only the leading `name=value` pair matters for extraction; attributes such
//! as `Domain`, `Path`, `Expires` or `HttpOnly` that follow the first `;` in a
//! `Set-Cookie` line are ignored.

/// A single cookie name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Parses one cookie from a `Set-Cookie` header value or a single pair of a
/// `Cookie` request header.
///
/// Returns `None` when the leading segment has no `=`.
///
/// # Examples
///
/// ```
/// use scan_playbook::variables::cookie::parse_cookie;
///
/// let cookie = parse_cookie("SESSIONID=abc123; Path=/; HttpOnly").unwrap();
/// assert_eq!(cookie.name, "SESSIONID");
/// assert_eq!(cookie.value, "abc123");
/// ```
pub fn parse_cookie(input: &str) -> Option<Cookie<'_>> {
    let pair = input.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;

    Some(Cookie {
        name: name.trim(),
        value: value.trim(),
    })
}

/// Finds a cookie in a list of `Set-Cookie` header values.
///
/// Each header line carries exactly one cookie. Names compare exactly.
pub fn find_set_cookie<'a, I>(lines: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(parse_cookie)
        .find(|cookie| cookie.name == name)
        .map(|cookie| cookie.value)
}

/// Finds a cookie in a `Cookie` request header value, whose pairs are
/// joined by `separator` (normally `"; "`).
pub fn find_request_cookie<'a>(header: &'a str, separator: &str, name: &str) -> Option<&'a str> {
    header
        .split(separator)
        .filter_map(parse_cookie)
        .find(|cookie| cookie.name == name)
        .map(|cookie| cookie.value)
}
