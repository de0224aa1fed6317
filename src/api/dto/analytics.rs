//! DTOs for the analytics endpoint.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::links::short_url;
use crate::domain::analytics::{AnalyticsResult, Period};
use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted calendar years for `start` / `end`.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1970..=9999;

/// Raw `GET /api/analytics` query.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

impl AnalyticsParams {
    /// Parses `start` / `end` as `YYYY-MM-DD`; empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the malformed parameter.
    pub fn dates(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
        Ok((
            parse_date("start", self.start.as_deref())?,
            parse_date("end", self.end.as_deref())?,
        ))
    }

    pub fn period(&self) -> Period {
        self.period
            .as_deref()
            .map(Period::parse_lenient)
            .unwrap_or_default()
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        AppError::bad_request(
            format!("Invalid {field} date, expected YYYY-MM-DD"),
            json!({ "field": field, "value": value }),
        )
    })?;

    if !YEAR_RANGE.contains(&date.year()) {
        return Err(AppError::bad_request(
            format!(
                "{field} date out of range, expected a year between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ),
            json!({ "field": field, "value": value }),
        ));
    }

    Ok(Some(date))
}

#[derive(Debug, Serialize)]
pub struct BucketResponse {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct UrlStatResponse {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub url_filter: Option<String>,
    pub start: String,
    pub end: String,
    pub period: Period,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total_clicks: i64,
    pub buckets: Vec<BucketResponse>,
    pub per_url_stats: Vec<UrlStatResponse>,
    pub filters: FiltersResponse,
}

impl AnalyticsResponse {
    pub fn new(result: AnalyticsResult, base_url: &str) -> Self {
        Self {
            total_clicks: result.total_clicks,
            buckets: result
                .buckets
                .into_iter()
                .map(|b| BucketResponse {
                    label: b.label,
                    count: b.count,
                })
                .collect(),
            per_url_stats: result
                .per_url_stats
                .into_iter()
                .map(|s| UrlStatResponse {
                    short_url: short_url(base_url, &s.short_code),
                    id: s.id,
                    short_code: s.short_code,
                    original_url: s.original_url,
                    click_count: s.click_count,
                    created_at: s.created_at,
                })
                .collect(),
            filters: FiltersResponse {
                url_filter: result.url_filter,
                start: result.start.format(DATE_FORMAT).to_string(),
                end: result.end.format(DATE_FORMAT).to_string(),
                period: result.period,
            },
        }
    }
}
