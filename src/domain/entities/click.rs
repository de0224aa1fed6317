//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a shortened link is followed.
///
/// Click rows are append-only: they are never updated and only disappear when
/// the owning link is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub url_id: i64,
    pub clicked_at: DateTime<Utc>,
}

impl Click {
    pub fn new(id: i64, url_id: i64, clicked_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url_id,
            clicked_at,
        }
    }
}

/// Input data for recording a new click.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub url_id: i64,
    pub clicked_at: DateTime<Utc>,
}
