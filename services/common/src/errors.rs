//! Common error types for services

use thiserror::Error;

/// Service error types
///
/// Only two kinds are meaningful at this scope: the key-value store
/// being unreachable, and a caller exceeding the request cap.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Connectivity or timeout failure talking to the key-value store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Caller exceeded the request cap; not a system fault
    #[error("Rate limited: {0}")]
    RateLimited(String),
}

impl From<redis::RedisError> for StatsError {
    fn from(err: redis::RedisError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
