//! Short link resolution and management.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{generate_code, validate_alias};
use crate::utils::url_check::validate_original_url;

/// Attempts at inserting a generated code before giving up.
const MAX_GENERATED_CODE_ATTEMPTS: usize = 2;

/// Service resolving short codes and mutating short link records.
///
/// The Store behind [`UrlRepository`] is authoritative. The [`CacheService`]
/// only holds copies of `original_url` for the resolution path and is
/// invalidated after every committed mutation.
pub struct LinkService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `cache_ttl_seconds` is the lifetime of entries written on a resolve miss.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Resolves a short code to its original URL and records the visit.
    ///
    /// # Flow
    ///
    /// 1. Cache lookup; a hit supplies the redirect target
    /// 2. On a miss, Store lookup; the result is cached with the configured TTL
    /// 3. The visit is recorded in the Store on both paths
    ///
    /// Unknown codes are never cached. If the visit update matches no row
    /// (a cache hit for a code deleted in the meantime), the entry is dropped
    /// and the code is reported as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on Store errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let cached = match self.cache.get_url(short_code).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(short_code, error = %e, "Cache lookup failed, falling back to store");
                None
            }
        };
        let cache_hit = cached.is_some();

        let original_url = match cached {
            Some(url) => url,
            None => {
                let record = self
                    .repository
                    .find_by_code(short_code)
                    .await?
                    .ok_or_else(|| not_found(short_code))?;

                if let Err(e) = self
                    .cache
                    .set_url(short_code, &record.original_url, Some(self.cache_ttl_seconds))
                    .await
                {
                    warn!(short_code, error = %e, "Failed to cache resolved URL");
                }

                record.original_url
            }
        };

        if !self.repository.record_visit(short_code, Utc::now()).await? {
            self.invalidate(short_code).await;
            return Err(not_found(short_code));
        }

        info!(short_code, cache_hit, "Resolved short code");
        Ok(original_url)
    }

    /// Creates a short link, either under the given alias or a generated code.
    ///
    /// # Code Selection
    ///
    /// - With `alias`: validated, then checked for existence. The Store's
    ///   unique constraint is the final arbiter if two requests race.
    /// - Without: a random 12-character code. A primary-key collision
    ///   triggers one regeneration before failing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the alias is malformed.
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on Store errors or repeated collisions.
    pub async fn create_short_link(
        &self,
        original_url: String,
        alias: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        validate_original_url(&original_url)?;

        let record = match alias {
            Some(alias) => self.create_with_alias(original_url, alias).await?,
            None => self.create_with_generated_code(original_url).await?,
        };

        self.invalidate(&record.short_code).await;

        info!(short_code = %record.short_code, "Created short link");
        Ok(record)
    }

    /// Points an existing short code at a new URL.
    ///
    /// The Store's `UPDATE ... RETURNING` doubles as the existence check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new URL is malformed.
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on Store errors.
    pub async fn update_link(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<UrlRecord, AppError> {
        validate_original_url(original_url)?;

        let record = self
            .repository
            .update_original_url(short_code, original_url)
            .await?
            .ok_or_else(|| not_found(short_code))?;

        self.invalidate(short_code).await;

        info!(short_code, "Updated short link");
        Ok(record)
    }

    /// Deletes a short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on Store errors.
    pub async fn delete_link(&self, short_code: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete(short_code).await?;
        if deleted == 0 {
            return Err(not_found(short_code));
        }

        self.invalidate(short_code).await;

        info!(short_code, "Deleted short link");
        Ok(())
    }

    /// Finds every short link pointing at exactly `original_url`.
    ///
    /// No normalization is applied. An empty result is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on Store errors.
    pub async fn search_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let records = self.repository.find_by_original_url(original_url).await?;

        if records.is_empty() {
            return Err(AppError::not_found(
                "No short links found for this URL",
                json!({ "original_url": original_url }),
            ));
        }

        Ok(records)
    }

    /// Returns the stored record, including visit statistics.
    ///
    /// Always read from the Store; the cache never holds visit data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on Store errors.
    pub async fn get_stats(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))
    }

    /// Checks that the Store answers queries.
    ///
    /// # Errors
    ///
    /// Returns the Store error if the check query fails.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Checks the cache backend, returning its name and health.
    pub async fn cache_health(&self) -> (&'static str, bool) {
        (self.cache.backend_name(), self.cache.health_check().await)
    }

    async fn create_with_alias(
        &self,
        original_url: String,
        alias: String,
    ) -> Result<UrlRecord, AppError> {
        validate_alias(&alias)?;

        if self.repository.find_by_code(&alias).await?.is_some() {
            return Err(alias_taken(&alias));
        }

        let new_record = NewUrlRecord {
            short_code: alias.clone(),
            original_url,
        };

        match self.repository.insert(new_record).await {
            Err(AppError::Conflict { .. }) => Err(alias_taken(&alias)),
            other => other,
        }
    }

    async fn create_with_generated_code(&self, original_url: String) -> Result<UrlRecord, AppError> {
        for attempt in 1..=MAX_GENERATED_CODE_ATTEMPTS {
            let new_record = NewUrlRecord {
                short_code: generate_code()?,
                original_url: original_url.clone(),
            };

            match self.repository.insert(new_record).await {
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Generated code collision, retrying");
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Removes the cache entry for `short_code`.
    ///
    /// Must run after the Store mutation commits. Failures are logged only;
    /// a stale entry is bounded by the cache TTL.
    async fn invalidate(&self, short_code: &str) {
        match self.cache.invalidate(short_code).await {
            Ok(()) => debug!(short_code, "Invalidated cache entry"),
            Err(e) => warn!(short_code, error = %e, "Failed to invalidate cache entry"),
        }
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "short_code": short_code }))
}

fn alias_taken(alias: &str) -> AppError {
    AppError::conflict("This alias is already taken", json!({ "alias": alias }))
}
