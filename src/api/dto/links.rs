//! DTOs for the `/links` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::utils::code_generator::validate_alias;
use crate::utils::url_check::validate_original_url;

fn to_field_error(code: &'static str, e: AppError) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(e.to_string()))
}

fn original_url_rule(original_url: &str) -> Result<(), ValidationError> {
    validate_original_url(original_url).map_err(|e| to_field_error("url", e))
}

fn alias_rule(alias: &str) -> Result<(), ValidationError> {
    validate_alias(alias).map_err(|e| to_field_error("alias", e))
}

/// Request body for `POST /links/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortUrlCreate {
    /// The original URL to shorten.
    #[validate(custom(function = "original_url_rule"))]
    pub orig_url: String,

    /// Optional caller-chosen short code.
    #[validate(custom(function = "alias_rule"))]
    pub alias_url: Option<String>,
}

/// Request body for `PUT /links/{short_code}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlUpdate {
    #[validate(custom(function = "original_url_rule"))]
    pub orig_url: String,
}

/// Query string for `GET /links/search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "original_url must not be empty"))]
    pub original_url: String,
}

/// A short link as returned by create, update, and search.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlResponse {
    pub orig_url: String,
    pub short_url: String,
    pub registered_at: DateTime<Utc>,
}

impl From<UrlRecord> for ShortUrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            orig_url: record.original_url,
            short_url: record.short_code,
            registered_at: record.registered_at,
        }
    }
}

/// A short link with its visit statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlStatsResponse {
    #[serde(flatten)]
    pub link: ShortUrlResponse,
    pub get_num: i64,
    pub last_time: Option<DateTime<Utc>>,
}

impl From<UrlRecord> for ShortUrlStatsResponse {
    fn from(record: UrlRecord) -> Self {
        let get_num = record.visit_count;
        let last_time = record.last_visited_at;

        Self {
            link: record.into(),
            get_num,
            last_time,
        }
    }
}

/// Confirmation returned by `DELETE /links/{short_code}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = ShortUrlCreate {
            orig_url: "https://example.com".to_string(),
            alias_url: Some("my_link-1".to_string()),
        };
        assert!(valid.validate().is_ok());

        let no_alias = ShortUrlCreate {
            orig_url: "https://example.com".to_string(),
            alias_url: None,
        };
        assert!(no_alias.validate().is_ok());

        let bad_url = ShortUrlCreate {
            orig_url: "not a url".to_string(),
            alias_url: None,
        };
        assert!(bad_url.validate().is_err());

        let bad_alias = ShortUrlCreate {
            orig_url: "https://example.com".to_string(),
            alias_url: Some("with/slash".to_string()),
        };
        assert!(bad_alias.validate().is_err());

        let reserved_alias = ShortUrlCreate {
            orig_url: "https://example.com".to_string(),
            alias_url: Some("shorten".to_string()),
        };
        assert!(reserved_alias.validate().is_err());

        let newline_url = ShortUrlCreate {
            orig_url: "https://example.com/a\nb".to_string(),
            alias_url: None,
        };
        assert!(newline_url.validate().is_err());
    }

    #[test]
    fn test_stats_response_shape() {
        let mut record = UrlRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
        );
        record.visit_count = 2;

        let value = serde_json::to_value(ShortUrlStatsResponse::from(record)).unwrap();

        assert_eq!(value["short_url"], "abc123");
        assert_eq!(value["orig_url"], "https://example.com");
        assert_eq!(value["get_num"], 2);
        assert!(value["last_time"].is_null());
        assert!(value.get("registered_at").is_some());
    }
}
