//! Assignment of clicks to time buckets.

use super::{Bucket, Period};
use crate::domain::entities::Click;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Fills `buckets` with click counts and returns them.
///
/// Counts are reset first, so aggregating the same clicks twice gives the same
/// result. Each click goes to the bucket whose label it formats to:
///
/// - [`Period::Day`]: hour of day, counted across every day in the input
/// - [`Period::Week`] / [`Period::Month`]: calendar day
/// - [`Period::Year`]: calendar month
///
/// The bucket index is computed from the offset to the first bucket's start.
/// Clicks that land outside the sequence are dropped.
pub fn aggregate(clicks: &[Click], mut buckets: Vec<Bucket>, period: Period) -> Vec<Bucket> {
    for bucket in &mut buckets {
        bucket.count = 0;
    }

    let Some(origin) = buckets.first().map(|b| b.start) else {
        return buckets;
    };

    for click in clicks {
        if let Some(idx) = bucket_index(origin, click.clicked_at, period)
            && let Some(bucket) = buckets.get_mut(idx)
        {
            bucket.count += 1;
        }
    }

    buckets
}

fn bucket_index(origin: DateTime<Utc>, at: DateTime<Utc>, period: Period) -> Option<usize> {
    let offset = match period {
        Period::Day => (i64::from(at.hour()) - i64::from(origin.hour())).rem_euclid(24),
        Period::Week | Period::Month => (at.date_naive() - origin.date_naive()).num_days(),
        Period::Year => {
            i64::from(at.year() - origin.year()) * 12 + i64::from(at.month())
                - i64::from(origin.month())
        }
    };

    usize::try_from(offset).ok()
}

/// Counts clicks of `url_id` with `start <= clicked_at <= end`.
pub fn count_for_url(clicks: &[Click], url_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    clicks
        .iter()
        .filter(|c| c.url_id == url_id && c.clicked_at >= start && c.clicked_at <= end)
        .count() as i64
}
