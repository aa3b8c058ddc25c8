//! Rate limiter unit tests

use pretty_assertions::assert_eq;
use rstest::*;

use trade_stats_service::config::RateLimitConfig;
use trade_stats_service::rate_limiter::RateLimiter;

#[fixture]
fn capped_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        requests_per_minute: 120,
    }
}

#[fixture]
fn disabled_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: false,
        requests_per_minute: 120,
    }
}

#[rstest]
#[tokio::test]
async fn cap_allows_exactly_the_configured_requests_per_minute(capped_config: RateLimitConfig) {
    let rate_limiter = RateLimiter::new(capped_config);

    // The full cap passes within one rolling minute...
    for request in 1..=120 {
        let allowed = rate_limiter.check_rate_limit("203.0.113.9").await;
        assert!(allowed, "request {request} within the cap was rejected");
    }

    // ...and the 121st is rejected, not queued
    let allowed = rate_limiter.check_rate_limit("203.0.113.9").await;
    assert!(!allowed, "request over the cap was allowed");
}

#[rstest]
#[tokio::test]
async fn clients_are_limited_independently(capped_config: RateLimitConfig) {
    let rate_limiter = RateLimiter::new(capped_config);

    for _ in 0..120 {
        rate_limiter.check_rate_limit("203.0.113.9").await;
    }
    assert!(!rate_limiter.check_rate_limit("203.0.113.9").await);

    // A different client has its own bucket
    assert!(rate_limiter.check_rate_limit("198.51.100.7").await);
}

#[rstest]
#[tokio::test]
async fn disabled_limiter_always_allows(disabled_config: RateLimitConfig) {
    let rate_limiter = RateLimiter::new(disabled_config);

    for _ in 0..200 {
        assert!(rate_limiter.check_rate_limit("203.0.113.9").await);
    }
}

#[rstest]
#[tokio::test]
async fn limiters_are_tracked_per_client(capped_config: RateLimitConfig) {
    let rate_limiter = RateLimiter::new(capped_config);

    rate_limiter.check_rate_limit("203.0.113.9").await;
    rate_limiter.check_rate_limit("198.51.100.7").await;
    rate_limiter.check_rate_limit("203.0.113.9").await;

    assert_eq!(rate_limiter.tracked_clients().await, 2);
}

#[rstest]
#[tokio::test]
async fn cleanup_keeps_limiters_under_the_bound(capped_config: RateLimitConfig) {
    let rate_limiter = RateLimiter::new(capped_config);

    rate_limiter.check_rate_limit("203.0.113.9").await;
    rate_limiter.check_rate_limit("198.51.100.7").await;

    // Under the bound, cleanup leaves live buckets alone
    rate_limiter.cleanup_old_limiters().await;
    assert_eq!(rate_limiter.tracked_clients().await, 2);
}
