//! Bearer token credential values (RFC 6750).

/// Formats a token into a Bearer authentication header value.
///
/// A token that already carries the `Bearer ` prefix is returned trimmed
/// rather than prefixed twice.
///
/// # Examples
///
/// ```
/// use scan_playbook::auth::bearer::bearer_token;
///
/// assert_eq!(bearer_token("abc123xyz"), "Bearer abc123xyz");
/// assert_eq!(bearer_token("Bearer abc123xyz"), "Bearer abc123xyz");
/// ```
pub fn bearer_token(token: &str) -> String {
    match strip_bearer_prefix(token) {
        Some(bare) => format!("Bearer {}", bare),
        None => format!("Bearer {}", token.trim()),
    }
}

/// Returns the token part of a `Bearer <token>` value.
///
/// The prefix is matched case-sensitively; an empty token yields `None`.
pub fn strip_bearer_prefix(header: &str) -> Option<&str> {
    let token = header.trim().strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
