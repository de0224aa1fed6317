//! Cache trait for resolved short codes.

use async_trait::async_trait;

/// Errors surfaced by a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Short code -> destination URL cache used by the redirect path.
///
/// Implementations are fail-open: backend errors are logged and reported as a
/// miss (or a no-op for writes), so a broken cache only costs a database lookup.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with a fixed TTL
/// - [`crate::infrastructure::cache::NullCache`] - Caching disabled
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Destination URL for `code`, or `None` on a miss.
    async fn get(&self, code: &str) -> Option<String>;

    async fn set(&self, code: &str, original_url: &str);

    /// Drops the entry for `code`. Called when a link is edited or deleted.
    async fn remove(&self, code: &str);

    /// Returns true if the backend answers.
    async fn ping(&self) -> bool;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
