//! Link entity representing a shortened URL owned by a user.

use chrono::{DateTime, Utc};

/// A shortened URL.
///
/// `click_count` is a denormalized counter bumped by the click worker. It can lag
/// behind the stored click rows and is not used for analytics or listings, which
/// count clicks directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub user_id: i64,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link belongs to the given user.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub user_id: i64,
}

/// Replacement values for an existing link.
///
/// `short_code: None` keeps the current code.
#[derive(Debug, Clone)]
pub struct LinkPatch {
    pub original_url: String,
    pub short_code: Option<String>,
}
