//! Analytics assembly over the link and click stores.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::analytics::{
    AnalyticsQuery, AnalyticsResult, UrlStat, aggregate, count_for_url, generate_buckets,
};
use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Builds bucketed click analytics for one user.
///
/// Read-only and stateless; every call reads the stores afresh.
pub struct AnalyticsService<L: LinkRepository, C: ClickRepository> {
    link_repository: Arc<L>,
    click_repository: Arc<C>,
}

impl<L: LinkRepository, C: ClickRepository> AnalyticsService<L, C> {
    pub fn new(link_repository: Arc<L>, click_repository: Arc<C>) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Assembles totals, time buckets and per-link counts for `query`.
    ///
    /// A `url_filter` naming a code the user does not own is not an error: the
    /// result is empty with all buckets at zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start` is after `end`.
    /// Store errors are propagated unchanged.
    pub async fn assemble(&self, query: &AnalyticsQuery) -> Result<AnalyticsResult, AppError> {
        if !query.is_valid_range() {
            return Err(AppError::bad_request(
                "Start date must not be after end date",
                json!({ "start": query.start, "end": query.end }),
            ));
        }

        let links = self.resolve_links(query).await?;
        let url_ids: Vec<i64> = links.iter().map(|l| l.id).collect();

        let range_start = query.range_start();
        let range_end = query.range_end();

        let total_clicks = self
            .click_repository
            .count_in_range(&url_ids, range_start, range_end)
            .await?;

        let buckets = generate_buckets(range_start, range_end, query.period);
        let clicks = self
            .click_repository
            .find_in_range(&url_ids, range_start, range_end)
            .await?;
        let buckets = aggregate(&clicks, buckets, query.period);

        let per_url_stats = links
            .into_iter()
            .map(|link| UrlStat {
                click_count: count_for_url(&clicks, link.id, range_start, range_end),
                id: link.id,
                short_code: link.short_code,
                original_url: link.original_url,
                created_at: link.created_at,
            })
            .collect();

        debug!(
            user_id = query.user_id,
            period = %query.period,
            total_clicks,
            buckets = buckets.len(),
            "Analytics assembled"
        );

        Ok(AnalyticsResult {
            total_clicks,
            buckets,
            per_url_stats,
            url_filter: query.url_filter.clone(),
            start: query.start,
            end: query.end,
            period: query.period,
        })
    }

    async fn resolve_links(&self, query: &AnalyticsQuery) -> Result<Vec<Link>, AppError> {
        match &query.url_filter {
            Some(code) => Ok(self
                .link_repository
                .find_by_user_and_code(query.user_id, code)
                .await?
                .into_iter()
                .collect()),
            None => self.link_repository.find_by_user(query.user_id).await,
        }
    }
}
