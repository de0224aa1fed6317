//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "linkpulse:url:";

/// Redis cache for redirect lookups.
///
/// Holds a `ConnectionManager`, which reconnects on its own; clones share the
/// underlying multiplexed connection.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects and verifies the server with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the server is
    /// unreachable, or PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("invalid Redis URL: {e}")))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("PING failed: {e}")))?;

        info!(ttl_seconds, "Connected to Redis");

        Ok(Self { conn, ttl_seconds })
    }
}

fn cache_key(code: &str) -> String {
    format!("{KEY_PREFIX}{code}")
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, code: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(cache_key(code)).await {
            Ok(hit) => {
                debug!(code, hit = hit.is_some(), "Cache lookup");
                hit
            }
            Err(e) => {
                warn!(code, error = %e, "Redis GET failed");
                None
            }
        }
    }

    async fn set(&self, code: &str, original_url: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(cache_key(code), original_url, self.ttl_seconds)
            .await
        {
            warn!(code, error = %e, "Redis SET failed");
        }
    }

    async fn remove(&self, code: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(cache_key(code)).await {
            warn!(code, error = %e, "Redis DEL failed");
        }
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_namespaced() {
        assert_eq!(cache_key("abc123"), "linkpulse:url:abc123");
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisCache::connect("not-a-redis-url", 60).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
