//! Repository trait for short URL records.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store interface for short URL records.
///
/// Every method is a single statement and therefore atomic at row granularity.
/// Callers rely on that instead of application-level locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds every record whose original URL matches exactly.
    ///
    /// Results are ordered by `registered_at`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Vec<UrlRecord>, AppError>;

    /// Inserts a new record with `visit_count = 0` and no last visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Replaces the original URL of a record and returns the updated row.
    ///
    /// Returns `Ok(None)` when no record has the given code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_original_url(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Increments `visit_count` by one and sets `last_visited_at`.
    ///
    /// The increment happens inside the Store, never as read-modify-write.
    /// Returns `Ok(false)` when no record has the given code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Deletes a record and returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, short_code: &str) -> Result<u64, AppError>;

    /// Checks that the Store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the Store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
