//! Validation of URLs submitted for shortening.
//!
//! The accepted URL is stored exactly as submitted (minus surrounding
//! whitespace) so that resolving a code returns the same string the caller
//! shortened. Uniqueness is therefore byte-exact.

use url::Url;

/// Upper bound on stored URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns the first rule the input violates.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_original_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_original_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_original_url("http://example.com").is_ok());
        assert!(validate_original_url("https://example.com/a?b=c#d").is_ok());
    }

    #[test]
    fn test_preserves_url_verbatim() {
        let url = "https://EXAMPLE.com:443/Path?key=VALUE#anchor";
        assert_eq!(validate_original_url(url).unwrap(), url);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_original_url("  https://example.com/a\n").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_original_url("   "),
            Err(UrlValidationError::Empty)
        ));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_original_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com/file",
        ] {
            assert!(
                matches!(
                    validate_original_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_original_url(&url),
            Err(UrlValidationError::TooLong)
        ));
    }
}
