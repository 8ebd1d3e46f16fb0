//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// Only presence and size are checked here; scheme and host rules live in
/// the shortening service so that every caller gets them.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_fails_validation() {
        let req = ShortenRequest {
            original_url: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_deserializes_snake_case() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"original_url": "https://example.com"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.original_url, "https://example.com");
    }
}
