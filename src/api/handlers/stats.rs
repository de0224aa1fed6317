//! Handler for single-link statistics.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::links::LinkResponse;
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns one of the caller's links with its total click count.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or owned by another user.
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let stats = state.link_service.link_stats(user.user_id, &code).await?;

    Ok(Json(LinkResponse::from_stats(stats, &state.base_url)))
}
