//! HTTP Basic credential values (RFC 7617).
//!
//! Basic credentials are stored as `username:password`; the `Authorization`
//! header needs them base64-encoded behind a `Basic ` prefix.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes username and password into a Basic authentication header value.
///
/// # Examples
///
/// ```
/// use scan_playbook::auth::basic::basic_auth;
///
/// assert_eq!(basic_auth("user", "pass123"), "Basic dXNlcjpwYXNzMTIz");
/// ```
pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}

/// Turns a stored Basic secret into a header value.
///
/// The secret is split on its first colon. A secret that is already a valid
/// Basic header value is returned unchanged, and a secret without a colon is
/// treated as a username with an empty password.
pub fn basic_auth_from_secret(secret: &str) -> String {
    if decode_basic_auth(secret).is_some() {
        return secret.trim().to_string();
    }

    match secret.split_once(':') {
        Some((username, password)) => basic_auth(username, password),
        None => basic_auth(secret, ""),
    }
}

/// Decodes a `Basic <base64>` header value into username and password.
///
/// Returns `None` for anything that is not a well-formed Basic value.
pub fn decode_basic_auth(header: &str) -> Option<(String, String)> {
    let encoded = header.trim().strip_prefix("Basic ")?.trim();
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}
