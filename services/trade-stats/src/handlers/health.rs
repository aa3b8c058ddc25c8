//! Health check handler

use axum::{extract::State, http::StatusCode, response::Json};
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

use crate::models::{ApiResponse, HealthCheckResponse};
use crate::store::CounterStore;

/// Health check handlers
#[derive(Clone)]
pub struct HealthHandlers {
    store: Arc<dyn CounterStore>,
    start_time: Instant,
}

impl HealthHandlers {
    #[must_use]
    pub fn new(store: Arc<dyn CounterStore>, start_time: Instant) -> Self {
        Self { store, start_time }
    }

    /// Health check endpoint
    pub async fn health_check(
        State(handlers): State<Self>,
    ) -> Result<Json<ApiResponse<HealthCheckResponse>>, StatusCode> {
        info!("Health check request");

        let store_ok = match handlers.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                error!("Counter store ping failed: {}", e);
                false
            }
        };

        let status = if store_ok { "healthy" } else { "degraded" };

        let health_response = HealthCheckResponse {
            status: status.to_string(),
            store: store_ok,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: handlers.start_time.elapsed().as_secs(),
        };

        Ok(Json(ApiResponse::success(health_response, "Health check")))
    }
}
