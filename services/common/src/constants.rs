//! Common constants used across the trade-stats services
//!
//! Single source of truth for all magic numbers

// Time constants
pub const SECS_PER_MIN: u64 = 60;
pub const MINS_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const SECS_PER_DAY: u64 = SECS_PER_MIN * MINS_PER_HOUR * HOURS_PER_DAY;

// Counter storage
/// Namespace prefix for daily trade buckets
pub const TRADE_COUNT_NAMESPACE: &str = "stats:trades";
/// Days a bucket is retained after creation; exceeds the longest
/// aggregation window so a bucket never expires while still aggregable
pub const BUCKET_RETENTION_DAYS: u32 = 35;
/// Bucket TTL, fixed at creation and never refreshed. i64 for the
/// Redis EXPIRE argument.
pub const BUCKET_TTL_SECS: i64 = BUCKET_RETENTION_DAYS as i64 * SECS_PER_DAY as i64;

// Aggregation windows
pub const SHORT_WINDOW_DAYS: u32 = 7;
pub const LONG_WINDOW_DAYS: u32 = 30;

// Public reader
/// Freshness window for widget responses
pub const WIDGET_CACHE_MAX_AGE_SECS: u64 = 5;
/// Cache-control directive sent with stats responses; keep in sync with
/// `WIDGET_CACHE_MAX_AGE_SECS`
pub const WIDGET_CACHE_CONTROL: &str = "public, max-age=5";
/// Default per-client request cap
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 120;
/// Fixed rejection message for over-cap requests
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later";
