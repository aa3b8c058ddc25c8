//! REST API models and response envelopes

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Standard response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable status message
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful API response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Create an error API response
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Rolling totals shown by the public widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetStats {
    /// Trades recorded over the last 7 UTC days, today inclusive
    pub trades_7d: i64,
    /// Trades recorded over the last 30 UTC days, today inclusive
    pub trades_30d: i64,
    /// Instant the aggregate was computed, ISO 8601 UTC
    pub last_updated: DateTime<Utc>,
}

/// Arbitrary-window count with the per-day breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeCount {
    /// Sum across the whole window
    pub total: i64,
    /// Per-day counts keyed by `YYYY-MM-DD`
    pub daily: FxHashMap<String, i64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Whether the counter store answered a ping
    pub store: bool,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}
