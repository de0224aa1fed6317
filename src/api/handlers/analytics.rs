//! Handler for bucketed click analytics.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::api::dto::analytics::{AnalyticsParams, AnalyticsResponse};
use crate::api::middleware::AuthUser;
use crate::domain::analytics::AnalyticsQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Click analytics for the caller's links.
///
/// # Endpoint
///
/// `GET /api/analytics?url=&start=&end=&period=`
///
/// # Query Parameters
///
/// - `url` (optional): Short code to narrow to; an unknown code yields an empty result
/// - `start` / `end` (optional): `YYYY-MM-DD`, default last 30 days through today (UTC)
/// - `period` (optional): `day` | `week` | `month` | `year`, default `week`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed date or `start` after `end`.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let (start, end) = params.dates()?;

    let query = AnalyticsQuery::new(
        user.user_id,
        params.url.clone(),
        start,
        end,
        params.period(),
        Utc::now(),
    );

    let result = state.analytics_service.assemble(&query).await?;

    Ok(Json(AnalyticsResponse::new(result, &state.base_url)))
}
