//! URL helpers for joining the configured base address with endpoint paths.

/// Normalize a base URL by removing trailing slashes
///
/// ```
/// use relaychat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://chat.example.com/"), "https://chat.example.com");
/// assert_eq!(normalize_base_url("https://chat.example.com///"), "https://chat.example.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use relaychat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://chat.example.com/", "/api/v1/chat"),
///     "https://chat.example.com/api/v1/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://tunnel.example.com"),
            "https://tunnel.example.com"
        );
        assert_eq!(
            normalize_base_url(" https://tunnel.example.com/ "),
            "https://tunnel.example.com"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080/prefix//"),
            "http://localhost:8080/prefix"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url() {
        assert_eq!(
            construct_api_url("https://tunnel.example.com", "api/v1/chat"),
            "https://tunnel.example.com/api/v1/chat"
        );
        assert_eq!(
            construct_api_url("https://tunnel.example.com/", "///api/v1/chat"),
            "https://tunnel.example.com/api/v1/chat"
        );
        // A path prefix on the base address is kept
        assert_eq!(
            construct_api_url("http://localhost:8080/openwebui/", "api/v1/chat"),
            "http://localhost:8080/openwebui/api/v1/chat"
        );
    }
}
