//! In-process implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// In-memory repository backed by a [`DashMap`].
///
/// Mirrors the PostgreSQL semantics: inserts fail on a taken code, and every
/// mutation happens under the shard lock of its key, so increments are atomic.
/// Used by integration tests and for running the service without a database.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    records: DashMap<String, UrlRecord>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(short_code).map(|r| r.clone()))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Vec<UrlRecord>, AppError> {
        let mut records: Vec<UrlRecord> = self
            .records
            .iter()
            .filter(|r| r.original_url == original_url)
            .map(|r| r.clone())
            .collect();

        records.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.short_code.cmp(&b.short_code))
        });

        Ok(records)
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.records.entry(new_record.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_pkey" }),
            )),
            Entry::Vacant(slot) => {
                let record = UrlRecord::new(
                    new_record.short_code,
                    new_record.original_url,
                    Utc::now(),
                );
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn update_original_url(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get_mut(short_code).map(|mut r| {
            r.original_url = original_url.to_string();
            r.clone()
        }))
    }

    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let Some(mut record) = self.records.get_mut(short_code) else {
            return Ok(false);
        };

        record.visit_count += 1;
        record.last_visited_at = Some(match record.last_visited_at {
            Some(previous) if previous > visited_at => previous,
            _ => visited_at,
        });

        Ok(true)
    }

    async fn delete(&self, short_code: &str) -> Result<u64, AppError> {
        Ok(self.records.remove(short_code).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
