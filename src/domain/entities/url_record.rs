//! Short URL record stored in the `urls` table.

use chrono::{DateTime, Utc};

/// A short code mapped to its original URL, with visit tracking.
///
/// `visit_count` and `last_visited_at` are only ever written by the Store in a
/// single atomic statement; cached copies of a record carry just the URL.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub registered_at: DateTime<Utc>,
    pub visit_count: i64,
    pub last_visited_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a record that has never been visited.
    pub fn new(short_code: String, original_url: String, registered_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            original_url,
            registered_at,
            visit_count: 0,
            last_visited_at: None,
        }
    }
}

/// Input data for inserting a new record.
///
/// `registered_at` is assigned by the Store at insert time.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub original_url: String,
}
