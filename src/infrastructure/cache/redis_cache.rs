//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Namespace for redirect targets, so the database can be shared with other data.
const KEY_PREFIX: &str = "url:";

/// Redis cache for resolved redirect targets.
///
/// Cloning the [`ConnectionManager`] per call shares one multiplexed
/// connection. Every operation is fail-open: a Redis error is logged with the
/// short code and reported to the caller as a miss or a no-op.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_url`] gets no TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let mut conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!(default_ttl_seconds, "Connected to Redis");

        Ok(Self {
            conn,
            default_ttl_seconds,
        })
    }
}

fn cache_key(short_code: &str) -> String {
    format!("{KEY_PREFIX}{short_code}")
}

fn log_failure(command: &'static str, short_code: &str, error: &RedisError) {
    warn!(short_code, command, error = %error, "Redis command failed, continuing without cache");
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(cache_key(short_code)).await {
            Ok(cached) => {
                debug!(short_code, hit = cached.is_some(), "Redis lookup");
                Ok(cached)
            }
            Err(e) => {
                log_failure("GET", short_code, &e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl_seconds);
        // SET EX rejects a zero expiry
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(cache_key(short_code), original_url, ttl_seconds)
            .await
        {
            log_failure("SET", short_code, &e);
        } else {
            debug!(short_code, ttl_seconds, "Cached redirect target");
        }

        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        match conn.del::<_, u32>(cache_key(short_code)).await {
            Ok(removed) => debug!(short_code, removed, "Invalidated cache entry"),
            Err(e) => log_failure("DEL", short_code, &e),
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
