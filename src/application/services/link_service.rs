//! Link creation, lookup and management service.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;
use serde_json::json;
use tracing::info;

const MAX_CODE_ATTEMPTS: usize = 10;

/// A link together with its click total recounted from click rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkWithClicks {
    pub link: Link,
    pub total_clicks: i64,
}

/// Result of an edit; `previous_code` is what caches may still hold.
#[derive(Debug, Clone)]
pub struct UpdatedLink {
    pub link: Link,
    pub previous_code: String,
}

/// Service for creating, resolving and managing a user's short links.
///
/// Ownership is enforced here: a link that belongs to another user is reported
/// as not found.
pub struct LinkService<L: LinkRepository, C: ClickRepository> {
    link_repository: Arc<L>,
    click_repository: Arc<C>,
}

impl<L: LinkRepository, C: ClickRepository> LinkService<L, C> {
    pub fn new(link_repository: Arc<L>, click_repository: Arc<C>) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Creates a short link owned by `user_id`.
    ///
    /// # Code Selection
    ///
    /// - A non-empty `custom_code` is validated and must be free
    /// - Otherwise a random 8-character code is generated, retrying on collision
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a non-http(s) URL or a bad custom code.
    /// Returns [`AppError::Conflict`] if the custom code is taken.
    pub async fn create_link(
        &self,
        user_id: i64,
        original_url: &str,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let original_url = validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let custom_code = custom_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let short_code = match custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                self.ensure_code_available(&code).await?;
                code
            }
            None => self.generate_unique_code().await?,
        };

        let link = self
            .link_repository
            .create(NewLink {
                short_code,
                original_url,
                user_id,
            })
            .await?;

        info!(user_id, code = %link.short_code, "Short link created");
        Ok(link)
    }

    /// Resolves a short code for redirection, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// One page of the user's links, newest first, plus the user's total link count.
    pub async fn list_links(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LinkWithClicks>, i64), AppError> {
        let links = self
            .link_repository
            .list_by_user(user_id, limit, offset)
            .await?;
        let total = self.link_repository.count_by_user(user_id).await?;

        let mut items = Vec::with_capacity(links.len());
        for link in links {
            items.push(self.with_clicks(link).await?);
        }

        Ok((items, total))
    }

    /// Details of one of the user's links by short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or owned by another user.
    pub async fn link_stats(&self, user_id: i64, code: &str) -> Result<LinkWithClicks, AppError> {
        let link = self
            .link_repository
            .find_by_user_and_code(user_id, code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        self.with_clicks(link).await
    }

    /// Changes the destination and optionally the code of one of the user's links.
    ///
    /// Supplying the current code, or an empty one, leaves the code unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or not owned.
    /// Returns [`AppError::Validation`] for a bad URL or code.
    /// Returns [`AppError::Conflict`] if the new code is taken.
    pub async fn update_link(
        &self,
        user_id: i64,
        id: i64,
        original_url: &str,
        short_code: Option<String>,
    ) -> Result<UpdatedLink, AppError> {
        let current = self.owned_link(user_id, id).await?;

        let original_url = validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let short_code = short_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && *c != current.short_code);

        if let Some(code) = &short_code {
            validate_custom_code(code)?;
            self.ensure_code_available(code).await?;
        }

        let link = self
            .link_repository
            .update(
                id,
                LinkPatch {
                    original_url,
                    short_code,
                },
            )
            .await?;

        info!(user_id, id, code = %link.short_code, "Short link updated");
        Ok(UpdatedLink {
            link,
            previous_code: current.short_code,
        })
    }

    /// Deletes one of the user's links and its clicks, returning the removed link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or not owned.
    pub async fn delete_link(&self, user_id: i64, id: i64) -> Result<Link, AppError> {
        let link = self.owned_link(user_id, id).await?;

        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        info!(user_id, id, code = %link.short_code, "Short link deleted");
        Ok(link)
    }

    async fn owned_link(&self, user_id: i64, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .filter(|link| link.is_owned_by(user_id))
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    async fn with_clicks(&self, link: Link) -> Result<LinkWithClicks, AppError> {
        let total_clicks = self
            .click_repository
            .count_for_link(link.id, None, None)
            .await?;

        Ok(LinkWithClicks { link, total_clicks })
    }

    async fn ensure_code_available(&self, code: &str) -> Result<(), AppError> {
        if self.link_repository.find_by_code(code).await?.is_some() {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": code }),
            ));
        }
        Ok(())
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code()?;

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
