//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching resolved redirect targets keyed by short code.
///
/// The cache is advisory: it only ever holds a copy of a record's
/// `original_url`, never visit data. Implementations must be thread-safe and
/// degrade to misses or no-ops on backend failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss, expiry, or backend error (fail-open)
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores the original URL for a short code.
    ///
    /// # Arguments
    ///
    /// - `short_code` - The short code key
    /// - `original_url` - The redirect target to cache
    /// - `ttl_seconds` - TTL in seconds (implementation default if `None`)
    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes the entry for exactly this short code.
    ///
    /// Idempotent: invalidating a missing key succeeds. Call it only after the
    /// Store mutation that changed or removed the row has committed.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and health reports.
    fn backend_name(&self) -> &'static str;
}
