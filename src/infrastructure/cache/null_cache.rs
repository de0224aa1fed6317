//! No-op cache used when Redis is not configured.

use super::service::CacheService;
use async_trait::async_trait;

/// A cache that never stores anything; every lookup is a miss.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _code: &str) -> Option<String> {
        None
    }

    async fn set(&self, _code: &str, _original_url: &str) {}

    async fn remove(&self, _code: &str) {}

    async fn ping(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
