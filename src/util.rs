//! Small helpers shared by playbook callers.

/// Splits a URL into whether it uses HTTPS and its lowercased hostname.
///
/// Unparsable input, or a URL without a host, yields `(false, "")`.
///
/// # Examples
///
/// ```
/// use scan_playbook::util::parse_https_hostname;
///
/// assert_eq!(parse_https_hostname("https://API.Example.com/v1"), (true, "api.example.com".to_string()));
/// assert_eq!(parse_https_hostname("not a url"), (false, String::new()));
/// ```
pub fn parse_https_hostname(url: &str) -> (bool, String) {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let is_https = parsed.scheme() == "https";
            let hostname = parsed.host_str().unwrap_or_default().to_lowercase();
            (is_https, hostname)
        }
        Err(e) => {
            tracing::trace!(url, error = %e, "unparsable url");
            (false, String::new())
        }
    }
}
