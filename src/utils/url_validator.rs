//! Destination URL validation.

use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute http(s) URL with a host.
///
/// Returns the trimmed input unchanged; the stored destination is exactly what
/// the user submitted.
///
/// # Errors
///
/// Returns [`UrlError`] describing why the URL was rejected.
pub fn validate_url(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedProtocol);
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            validate_url("https://example.com/path?q=1").unwrap(),
            "https://example.com/path?q=1"
        );
        assert!(validate_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_keeps_input_as_is() {
        assert_eq!(
            validate_url("  HTTPS://Example.COM/Path#frag ").unwrap(),
            "HTTPS://Example.COM/Path#frag"
        );
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in ["ftp://example.com", "javascript:alert(1)", "mailto:a@b.c"] {
            assert_eq!(validate_url(input), Err(UrlError::UnsupportedProtocol));
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            validate_url("not-a-url"),
            Err(UrlError::InvalidFormat(_))
        ));
        assert_eq!(validate_url("   "), Err(UrlError::Empty));
    }
}
