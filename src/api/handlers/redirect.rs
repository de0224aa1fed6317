//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the code up in the cache
/// 2. On a miss, resolve it from the database and cache the result
/// 3. Enqueue a click event for the background worker
/// 4. Return 307 Temporary Redirect
///
/// A temporary redirect keeps browsers from caching the hop, so every visit is
/// counted.
///
/// # Click Tracking
///
/// Events go to a bounded channel with `try_send`. A full queue drops the event
/// and logs a warning; the redirect is served either way.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = match state.cache.get(&code).await {
        Some(url) => url,
        None => {
            let link = state.link_service.resolve(&code).await?;
            state.cache.set(&code, &link.original_url).await;
            link.original_url
        }
    };

    match state.click_sender.try_send(ClickEvent::new(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue full, event dropped");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            debug!(code = %event.code, "Click queue closed, event dropped");
        }
    }

    Ok(Redirect::temporary(&original_url))
}
