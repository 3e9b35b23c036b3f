//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL records.
///
/// Uses SQLx prepared statements. Visit tracking and updates are single
/// statements so concurrent requests never lose an increment.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT short_code, original_url, registered_at, visit_count, last_visited_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Vec<UrlRecord>, AppError> {
        let records = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT short_code, original_url, registered_at, visit_count, last_visited_at
            FROM urls
            WHERE original_url = $1
            ORDER BY registered_at ASC, short_code ASC
            "#,
        )
        .bind(original_url)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (short_code, original_url)
            VALUES ($1, $2)
            RETURNING short_code, original_url, registered_at, visit_count, last_visited_at
            "#,
        )
        .bind(&new_record.short_code)
        .bind(&new_record.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn update_original_url(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            UPDATE urls
            SET original_url = $2
            WHERE short_code = $1
            RETURNING short_code, original_url, registered_at, visit_count, last_visited_at
            "#,
        )
        .bind(short_code)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET visit_count = visit_count + 1,
                last_visited_at = GREATEST(COALESCE(last_visited_at, $2), $2)
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .bind(visited_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, short_code: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
