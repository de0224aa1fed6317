//! Time-bucketed click analytics.
//!
//! Pure, synchronous building blocks used by
//! [`crate::application::services::AnalyticsService`]:
//!
//! - [`buckets::generate_buckets`] - builds the empty, labeled bucket sequence
//! - [`aggregator::aggregate`] - fills bucket counts from click records
//!
//! Nothing here touches the store; callers fetch clicks first.

pub mod aggregator;
pub mod buckets;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use aggregator::{aggregate, count_for_url};
pub use buckets::{MAX_DAILY_BUCKETS, generate_buckets};

/// Number of days covered by a query without an explicit start date.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Reporting granularity.
///
/// `Day` yields hourly buckets, `Week` and `Month` yield daily buckets, `Year`
/// yields monthly buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    /// Parses a period name, falling back to the daily-bucket scheme for
    /// anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::Week,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Format used for bucket labels of this period.
    pub fn label_format(&self) -> &'static str {
        match self {
            Self::Day => "%H:%M",
            Self::Week | Self::Month => "%Y-%m-%d",
            Self::Year => "%Y-%m",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled time interval with an event count. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub count: i64,
}

impl Bucket {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, period: Period) -> Self {
        Self {
            label: start.format(period.label_format()).to_string(),
            start,
            end,
            count: 0,
        }
    }
}

/// Analytics request for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub user_id: i64,
    pub url_filter: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period: Period,
}

impl AnalyticsQuery {
    /// Builds a query, defaulting `start` to [`DEFAULT_RANGE_DAYS`] before `now`
    /// and `end` to `now`. An empty filter is treated as no filter.
    pub fn new(
        user_id: i64,
        url_filter: Option<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        period: Period,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        Self {
            user_id,
            url_filter: url_filter
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty()),
            start: start.unwrap_or(today - Duration::days(DEFAULT_RANGE_DAYS)),
            end: end.unwrap_or(today),
            period,
        }
    }

    /// Returns true when `start <= end`.
    pub fn is_valid_range(&self) -> bool {
        self.start <= self.end
    }

    /// First instant covered by the query (`start` at midnight UTC).
    pub fn range_start(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Last instant covered by the query (`end` at 23:59:59 UTC).
    pub fn range_end(&self) -> DateTime<Utc> {
        self.end
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| self.range_start())
    }
}

/// Click total for one link within the queried range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStat {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Assembled analytics payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsResult {
    pub total_clicks: i64,
    pub buckets: Vec<Bucket>,
    pub per_url_stats: Vec<UrlStat>,
    pub url_filter: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period: Period,
}
