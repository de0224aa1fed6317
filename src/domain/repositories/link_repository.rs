//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened URLs (the URL registry).
///
/// Every link belongs to exactly one user. Lookups scoped by user never return
/// links owned by someone else.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code regardless of owner.
    ///
    /// Used by the redirect path.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// All links owned by a user, newest first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// The user's link with the given short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if the code exists and is owned by `user_id`
    /// - `Ok(None)` otherwise
    async fn find_by_user_and_code(
        &self,
        user_id: i64,
        code: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists a user's links with offset pagination, newest first.
    ///
    /// # Arguments
    ///
    /// - `limit` - Maximum number of rows
    /// - `offset` - Number of rows to skip
    async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Link>, AppError>;

    async fn count_by_user(&self, user_id: i64) -> Result<i64, AppError>;

    /// Replaces the destination URL and optionally the short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has the given id.
    /// Returns [`AppError::Conflict`] if the new short code is taken.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Deletes a link and, through the foreign key cascade, its clicks.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if not found.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Bumps the denormalized `click_count` column by one.
    async fn increment_click_count(&self, id: i64) -> Result<(), AppError>;

    /// Total number of links across all users.
    async fn count_all(&self) -> Result<i64, AppError>;
}
