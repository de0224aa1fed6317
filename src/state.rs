//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, AuthService, LinkService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    SqliteClickRepository, SqliteLinkRepository, SqliteUserRepository,
};

pub type SqliteLinkService = LinkService<SqliteLinkRepository, SqliteClickRepository>;
pub type SqliteAnalyticsService = AnalyticsService<SqliteLinkRepository, SqliteClickRepository>;

/// Cloned per request by axum; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Pool handle used directly only by the health check.
    pub db: Arc<SqlitePool>,
    pub auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub link_service: Arc<SqliteLinkService>,
    pub analytics_service: Arc<SqliteAnalyticsService>,
    pub cache: Arc<dyn CacheService>,
    /// Producer side of the click queue drained by the click worker.
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public prefix of short links, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Builds the repositories and services on top of one pool.
    pub fn new(
        pool: Arc<SqlitePool>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        jwt_secret: &str,
        jwt_ttl_hours: i64,
        base_url: impl Into<String>,
    ) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
        let click_repository = Arc::new(SqliteClickRepository::new(pool.clone()));

        Self {
            db: pool,
            auth_service: Arc::new(AuthService::new(
                user_repository,
                jwt_secret,
                jwt_ttl_hours,
            )),
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                click_repository.clone(),
            )),
            analytics_service: Arc::new(AnalyticsService::new(link_repository, click_repository)),
            cache,
            click_sender,
            base_url: base_url.into(),
        }
    }
}
