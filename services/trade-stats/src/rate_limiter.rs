//! Rate limiting implementation using token bucket algorithm

use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use rustc_hash::FxHashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::RateLimitConfig;
use services_common::DEFAULT_REQUESTS_PER_MINUTE;

// Safe fallback if the configured cap is zero
const FALLBACK_REQUESTS_PER_MINUTE: NonZeroU32 =
    NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE).unwrap();

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Per-client request cap for the public reader
///
/// One token bucket per client IP, replenished over a rolling minute.
/// Over-cap requests are rejected, never queued.
pub struct RateLimiter {
    /// Per-client rate limiters
    client_limiters: Arc<RwLock<FxHashMap<String, DirectLimiter>>>,
    /// Configuration
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            client_limiters: Arc::new(RwLock::new(FxHashMap::default())),
            config,
        }
    }

    /// Check whether a request from `client_ip` is within the cap
    pub async fn check_rate_limit(&self, client_ip: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let mut limiters = self.client_limiters.write().await;

        // Get or create limiter for this client
        let limiter = limiters.entry(client_ip.to_string()).or_insert_with(|| {
            let quota = Quota::per_minute(
                NonZeroU32::new(self.config.requests_per_minute)
                    .unwrap_or(FALLBACK_REQUESTS_PER_MINUTE),
            );
            GovernorRateLimiter::direct(quota)
        });

        match limiter.check() {
            Ok(()) => true,
            Err(_) => {
                warn!("Rate limit exceeded for IP: {}", client_ip);
                false
            }
        }
    }

    /// Number of clients currently tracked
    pub async fn tracked_clients(&self) -> usize {
        self.client_limiters.read().await.len()
    }

    /// Clear old rate limiters to prevent unbounded growth
    pub async fn cleanup_old_limiters(&self) {
        const MAX_LIMITERS: usize = 10000;

        let mut limiters = self.client_limiters.write().await;
        if limiters.len() > MAX_LIMITERS {
            limiters.clear();
        }
    }
}
