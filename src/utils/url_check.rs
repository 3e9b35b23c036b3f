//! Redirect target validation.

use axum::http::HeaderValue;
use serde_json::json;
use validator::ValidateUrl;

use crate::error::AppError;

/// Validates a URL before it is stored as a redirect target.
///
/// The value must parse as an absolute URL and be usable verbatim as a
/// `Location` header. The URL parser silently drops tabs and newlines, so a
/// string can parse and still be unsendable; those are rejected here.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if either check fails.
pub fn validate_original_url(original_url: &str) -> Result<(), AppError> {
    if !original_url.validate_url() {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "orig_url": original_url }),
        ));
    }

    if original_url.chars().any(char::is_control) || HeaderValue::from_str(original_url).is_err()
    {
        return Err(AppError::bad_request(
            "URL contains characters that cannot be used in a redirect",
            json!({ "orig_url": original_url }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_urls() {
        assert!(validate_original_url("https://example.com").is_ok());
        assert!(validate_original_url("http://example.com/a/b?q=1#frag").is_ok());
        assert!(validate_original_url("https://example.com/caf%C3%A9").is_ok());
    }

    #[test]
    fn test_rejects_non_urls() {
        assert!(validate_original_url("not a url").is_err());
        assert!(validate_original_url("").is_err());
        assert!(validate_original_url("/relative/path").is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        for url in [
            "https://example.com/a\nb",
            "https://example.com/a\rb",
            "https://example.com/a\tb",
            "https://example.com/a\u{7f}b",
        ] {
            let result = validate_original_url(url);
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{url:?} should be rejected"
            );
        }
    }
}
