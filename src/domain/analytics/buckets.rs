//! Bucket generation for a date range and period.

use super::{Bucket, Period};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};

/// Upper bound on daily buckets produced for `week`/`month` queries.
pub const MAX_DAILY_BUCKETS: usize = 365;

const HOURS_PER_DAY: i64 = 24;
const MONTHS_PER_YEAR: u32 = 12;

/// Builds the ordered, empty bucket sequence covering `[start, end]`.
///
/// - [`Period::Day`]: 24 hourly buckets starting at `start`, regardless of `end`
/// - [`Period::Week`] / [`Period::Month`]: one bucket per calendar day from
///   `start` to `end`, at most [`MAX_DAILY_BUCKETS`]
/// - [`Period::Year`]: one bucket per calendar month starting at `start`'s month,
///   at most 12, stopping once a month begins after `end`
///
/// Returns an empty vector when `start > end`, except for `Day`.
pub fn generate_buckets(start: DateTime<Utc>, end: DateTime<Utc>, period: Period) -> Vec<Bucket> {
    match period {
        Period::Day => hourly(start),
        Period::Week | Period::Month => daily(start, end),
        Period::Year => monthly(start, end),
    }
}

fn hourly(start: DateTime<Utc>) -> Vec<Bucket> {
    let last_second = Duration::hours(1) - Duration::seconds(1);

    (0..HOURS_PER_DAY)
        .map_while(|i| {
            let bucket_start = start.checked_add_signed(Duration::hours(i))?;
            let bucket_end = bucket_start.checked_add_signed(last_second)?;
            Some(Bucket::new(bucket_start, bucket_end, Period::Day))
        })
        .collect()
}

fn daily(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Bucket> {
    let last = end.date_naive();
    let mut day = start.date_naive();
    let mut buckets = Vec::new();

    while day <= last && buckets.len() < MAX_DAILY_BUCKETS {
        let bucket_start = midnight(day);
        let Some(bucket_end) = end_of_day(day) else {
            break;
        };
        buckets.push(Bucket::new(bucket_start, bucket_end, Period::Week));

        // `succ_opt` is None only at `NaiveDate::MAX`.
        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }

    buckets
}

fn monthly(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Bucket> {
    let Some(first) = start.date_naive().with_day(1) else {
        return Vec::new();
    };

    let mut buckets = Vec::with_capacity(MONTHS_PER_YEAR as usize);
    for i in 0..MONTHS_PER_YEAR {
        let Some(month_start) = first.checked_add_months(Months::new(i)) else {
            break;
        };
        let bucket_start = midnight(month_start);
        if bucket_start > end {
            break;
        }

        let last_day = month_start
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        let Some(bucket_end) = end_of_day(last_day) else {
            break;
        };
        buckets.push(Bucket::new(bucket_start, bucket_end, Period::Year));
    }

    buckets
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    midnight(day).checked_add_signed(Duration::days(1) - Duration::seconds(1))
}
