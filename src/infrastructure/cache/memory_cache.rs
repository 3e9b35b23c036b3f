//! In-process TTL cache.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedUrl {
    original_url: String,
    expires_at: Instant,
}

impl CachedUrl {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe in-memory cache mapping short codes to redirect targets.
///
/// Backed by a [`DashMap`] so lookups for different codes never contend on a
/// single lock. Expired entries are dropped lazily on read.
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, CachedUrl>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache whose entries live for `default_ttl_seconds`
    /// unless a TTL is given explicitly.
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(short_code) {
            if !entry.is_expired(now) {
                debug!(short_code, "Cache HIT");
                return Ok(Some(entry.original_url.clone()));
            }
        } else {
            debug!(short_code, "Cache MISS");
            return Ok(None);
        }

        // Only evict if nobody refreshed the entry since the read above.
        self.entries
            .remove_if(short_code, |_, entry| entry.is_expired(now));
        debug!(short_code, "Cache EXPIRED");
        Ok(None)
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds.map_or(self.default_ttl, Duration::from_secs);

        self.entries.insert(
            short_code.to_string(),
            CachedUrl {
                original_url: original_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        debug!(short_code, ttl_seconds = ttl.as_secs(), "Cache SET");
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        if self.entries.remove(short_code).is_some() {
            debug!(short_code, "Cache INVALIDATE");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
