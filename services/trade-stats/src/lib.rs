//! Trade statistics service
//!
//! Counts completed trades into per-day UTC buckets in Redis and serves
//! rolling 7/30-day aggregates over a rate-limited public REST API.
//! Features:
//! - Atomic per-day counters with a fixed retention window
//! - Fire-and-forget recording off the trade-creation path
//! - Batched single-round-trip window aggregation
//! - HTTP-level response caching instead of internal caches

#![allow(missing_docs)]

use anyhow::Result;

pub mod aggregator;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod recorder;
pub mod server;
pub mod store;

pub use config::{RateLimitConfig, RedisConfig, ServerConfig, StatsConfig};
pub use server::StatsServer;

/// Start the trade-stats server
pub async fn start_server(config: StatsConfig) -> Result<()> {
    let server = StatsServer::new(config).await?;
    server.start().await
}
