//! Configuration for the trade-stats service

use anyhow::Result;
use serde::{Deserialize, Serialize};
use services_common::DEFAULT_REQUESTS_PER_MINUTE;

/// Trade-stats service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Counter store configuration
    pub redis: RedisConfig,
    /// Rate limiting configuration
    pub rate_limiting: RateLimitConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

/// Counter store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,
    /// Per-client request cap per rolling minute
    pub requests_per_minute: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
            },
            rate_limiting: RateLimitConfig {
                enabled: true,
                requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            },
        }
    }
}

impl StatsConfig {
    /// Load configuration from file, with `STATS_`-prefixed environment
    /// variable overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("STATS"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
