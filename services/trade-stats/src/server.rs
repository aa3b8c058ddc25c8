//! Trade-stats server implementation

use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{Json, Response},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    aggregator::StatsAggregator,
    config::StatsConfig,
    handlers::{HealthHandlers, StatsHandlers, TradeCountQuery},
    middleware::{RateLimitState, create_cors_layer, logging_middleware, rate_limit_middleware},
    models::{ApiResponse, HealthCheckResponse},
    rate_limiter::RateLimiter,
    store::{CounterStore, RedisCounterStore},
};

/// Unified application state containing all handlers
#[derive(Clone)]
pub struct AppState {
    pub stats_handlers: StatsHandlers,
    pub health_handlers: HealthHandlers,
}

/// Trade-stats server
pub struct StatsServer {
    config: StatsConfig,
    store: Arc<dyn CounterStore>,
    start_time: Instant,
}

impl StatsServer {
    /// Create a server backed by Redis
    pub async fn new(config: StatsConfig) -> Result<Self> {
        info!("Connecting to counter store at {}", config.redis.url);

        let store = match RedisCounterStore::new(&config.redis.url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!("Failed to connect to Redis: {}", e);
                return Err(anyhow::anyhow!("Counter store connection failed: {}", e));
            }
        };

        info!("Trade-stats server initialized successfully");

        Ok(Self::with_store(config, store))
    }

    /// Create a server over an injected counter store backend
    #[must_use]
    pub fn with_store(config: StatsConfig, store: Arc<dyn CounterStore>) -> Self {
        Self {
            config,
            store,
            start_time: Instant::now(),
        }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = match self.config.server_address().parse() {
            Ok(addr) => addr,
            Err(e) => {
                error!(
                    "Invalid server address '{}': {}",
                    self.config.server_address(),
                    e
                );
                return Err(anyhow::anyhow!("Invalid server address: {}", e));
            }
        };

        let app = self.create_app();

        info!("Starting trade-stats server on {}", addr);

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                return Err(anyhow::anyhow!("Failed to bind to address {}: {}", addr, e));
            }
        };

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        Ok(())
    }

    /// Create the Axum application with all routes and middleware
    #[must_use]
    pub fn create_app(self) -> Router {
        let aggregator = StatsAggregator::new(Arc::clone(&self.store));
        let stats_handlers = StatsHandlers::new(aggregator);
        let health_handlers = HealthHandlers::new(Arc::clone(&self.store), self.start_time);

        let app_state = AppState {
            stats_handlers,
            health_handlers,
        };

        let rate_limiter = Arc::new(RateLimiter::new(self.config.rate_limiting.clone()));
        let rate_limit_state = RateLimitState {
            limiter: rate_limiter,
        };

        Router::new()
            // Health endpoint
            .route("/health", get(health_check))
            // Public stats endpoints
            .route("/api/v1/stats/widget", get(widget_stats))
            .route("/api/v1/stats/trades", get(trade_count))
            .with_state(app_state)
            // Add middleware layers separately to avoid trait bound issues
            .layer(middleware::from_fn_with_state(
                rate_limit_state,
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn(logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer())
    }
}

// Handler wrapper functions to work with unified state
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthCheckResponse>>, StatusCode> {
    HealthHandlers::health_check(State(state.health_handlers)).await
}

async fn widget_stats(State(state): State<AppState>) -> Response {
    StatsHandlers::widget_stats(State(state.stats_handlers)).await
}

async fn trade_count(
    State(state): State<AppState>,
    Query(query): Query<TradeCountQuery>,
) -> Response {
    StatsHandlers::trade_count(State(state.stats_handlers), Query(query)).await
}

/// API route documentation
pub fn print_routes() {
    println!("Trade Stats Routes:");
    println!("===================");
    println!();
    println!("Health & Monitoring:");
    println!("  GET  /health                 - Health check");
    println!();
    println!("Public Stats:");
    println!("  GET  /api/v1/stats/widget    - Rolling 7/30-day trade totals");
    println!("  GET  /api/v1/stats/trades    - Per-day counts (?days=N)");
    println!();
    println!("All endpoints support:");
    println!("- JSON response envelopes");
    println!("- Per-client rate limiting");
    println!("- CORS");
    println!("- Request tracing");
}
