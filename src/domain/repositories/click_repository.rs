//! Repository trait for click tracking.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for click records (the click store).
///
/// All range bounds are inclusive on both ends. An empty `url_ids` slice always
/// yields zero / no rows without touching the database.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteClickRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_click.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the link does not exist or on database errors.
    async fn record_click(&self, click: NewClick) -> Result<Click, AppError>;

    /// Counts clicks on any of `url_ids` with `start <= clicked_at <= end`.
    async fn count_in_range(
        &self,
        url_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    /// Fetches clicks on any of `url_ids` with `start <= clicked_at <= end`,
    /// ordered by time.
    async fn find_in_range(
        &self,
        url_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>, AppError>;

    /// Counts clicks on one link, optionally bounded by time on either side.
    async fn count_for_link(
        &self,
        url_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError>;

    /// Total number of clicks across all links.
    async fn count_all(&self) -> Result<i64, AppError>;
}
