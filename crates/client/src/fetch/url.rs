//! URL canonicalization for cache keys and shell resolution.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("not a site path: {0}")]
    NotAPath(String),
}

/// Canonicalize a URL string so equal resources share one cache key.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Resolve a site-relative path such as `/index.html` against the origin.
pub fn resolve_path(origin: &url::Url, path: &str) -> Result<url::Url, UrlError> {
    if !path.starts_with('/') {
        return Err(UrlError::NotAPath(path.to_string()));
    }
    let mut joined = origin.join(path).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    joined.set_fragment(None);
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://EXAMPLE.COM/Assets/App.JS").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/Assets/App.JS");
    }

    #[test]
    fn test_canonicalize_remove_fragment_keep_query() {
        let url = canonicalize("https://example.com/?b=2&a=1#experience").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("b=2&a=1"));
    }

    #[test]
    fn test_canonicalize_trim_whitespace() {
        let url = canonicalize("  http://localhost:5173  ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/");
    }

    #[test]
    fn test_canonicalize_rejects() {
        assert!(matches!(canonicalize(""), Err(UrlError::Empty)));
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
        assert!(matches!(canonicalize("chrome-extension://abc/x.js"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_resolve_path() {
        let origin = canonicalize("https://folio.dev").unwrap();
        assert_eq!(resolve_path(&origin, "/").unwrap().as_str(), "https://folio.dev/");
        assert_eq!(resolve_path(&origin, "/manifest.json").unwrap().as_str(), "https://folio.dev/manifest.json");
        assert!(matches!(resolve_path(&origin, "index.html"), Err(UrlError::NotAPath(_))));
    }

    #[test]
    fn test_resolve_path_ignores_origin_path() {
        let origin = canonicalize("https://folio.dev/blog/post").unwrap();
        assert_eq!(resolve_path(&origin, "/index.html").unwrap().as_str(), "https://folio.dev/index.html");
    }
}
