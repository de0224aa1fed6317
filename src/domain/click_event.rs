//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A redirect that still has to be persisted.
///
/// Passed from the redirect handler to the background worker through a bounded
/// channel so the redirect never waits on a database write. The timestamp is
/// taken when the request is served, not when the worker gets to it.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates an event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self::at(code, Utc::now())
    }

    pub fn at(code: impl Into<String>, clicked_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            clicked_at,
        }
    }
}
