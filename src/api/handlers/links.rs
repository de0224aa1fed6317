//! Handlers for link management endpoints (create, list, update, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::auth::MessageResponse;
use crate::api::dto::links::{LinkListResponse, LinkResponse, ShortenRequest, UpdateLinkRequest};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the caller.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/page", "custom_code": "my-link" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a non-http(s) URL or an invalid custom code.
/// Returns 409 Conflict if the custom code is taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(user.user_id, &payload.original_url, payload.custom_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::new(link, 0, &state.base_url)),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/urls?page=&limit=`
///
/// Paging is lenient: bad values fall back to defaults instead of failing.
/// `click_count` is recounted from stored clicks.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let page = params.resolve();

    let (items, total) = state
        .link_service
        .list_links(user.user_id, page.per_page, page.offset())
        .await?;

    Ok(Json(LinkListResponse {
        items: items
            .into_iter()
            .map(|item| LinkResponse::from_stats(item, &state.base_url))
            .collect(),
        pagination: PaginationMeta::new(page, total),
    }))
}

/// Replaces the destination (and optionally the code) of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/urls/{id}`
///
/// # Cache
///
/// The entry for the previous code is invalidated.
///
/// # Errors
///
/// Returns 404 Not Found if the link is missing or belongs to someone else.
/// Returns 409 Conflict if the new code is taken.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let updated = state
        .link_service
        .update_link(user.user_id, id, &payload.original_url, payload.short_code)
        .await?;

    state.cache.remove(&updated.previous_code).await;

    let stats = state
        .link_service
        .link_stats(user.user_id, &updated.link.short_code)
        .await?;

    Ok(Json(LinkResponse::from_stats(stats, &state.base_url)))
}

/// Deletes one of the caller's links together with its clicks.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link is missing or belongs to someone else.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let link = state.link_service.delete_link(user.user_id, id).await?;

    state.cache.remove(&link.short_code).await;

    Ok(Json(MessageResponse::new("URL deleted successfully")))
}
