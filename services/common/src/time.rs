//! UTC date handling for daily buckets
//!
//! Day boundaries are UTC-fixed: a trade at 23:59 UTC and one at
//! 00:01 UTC the next instant land in different buckets regardless of
//! the server's local time zone.

use chrono::{Days, NaiveDate, Utc};

/// Bucket date format, `YYYY-MM-DD`
pub const BUCKET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Current calendar date in UTC
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Ordered window of `days` dates, newest first
///
/// Offset 0 is `today`, offset `days - 1` is the oldest date in the
/// window.
#[must_use]
pub fn window_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .map(|offset| today - Days::new(u64::from(offset)))
        .collect()
}

/// Format a date as its bucket key suffix
#[must_use]
pub fn format_bucket_date(date: NaiveDate) -> String {
    date.format(BUCKET_DATE_FORMAT).to_string()
}
