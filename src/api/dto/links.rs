//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pagination::PaginationMeta;
use crate::application::services::LinkWithClicks;
use crate::domain::entities::Link;

#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL is required"))]
    pub original_url: String,

    /// Optional user-chosen code; rules are enforced by the link service.
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL is required"))]
    pub original_url: String,

    #[serde(default)]
    pub short_code: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response; `click_count` is taken from `clicks`, not the
    /// denormalized column.
    pub fn new(link: Link, clicks: i64, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.short_code),
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            click_count: clicks,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }

    pub fn from_stats(item: LinkWithClicks, base_url: &str) -> Self {
        Self::new(item.link, item.total_clicks, base_url)
    }
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkResponse>,
    pub pagination: PaginationMeta,
}

/// Joins the public base URL and a short code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
