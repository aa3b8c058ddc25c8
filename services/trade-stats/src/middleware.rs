//! Middleware for rate limiting and request logging

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::models::ApiResponse;
use crate::rate_limiter::RateLimiter;
use services_common::RATE_LIMIT_MESSAGE;

/// Rate limiting middleware state
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for RateLimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitState")
            .field("limiter", &"Arc<RateLimiter>")
            .finish()
    }
}

/// Rate limiting middleware
///
/// Over-cap requests receive a fixed rejection body immediately; they
/// are never queued or delayed.
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let client_ip = get_client_ip(&request);
    let path = request.uri().path();

    if !rate_limit_state.limiter.check_rate_limit(&client_ip).await {
        warn!(
            "Rate limit exceeded for IP: {} on path: {}",
            client_ip, path
        );

        let json_response = Json(ApiResponse::<()>::error(RATE_LIMIT_MESSAGE));
        return Err((StatusCode::TOO_MANY_REQUESTS, json_response).into_response());
    }

    Ok(next.run(request).await)
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = get_client_ip(&request);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = duration.as_millis(),
        client_ip = %client_ip,
        "Request processed"
    );

    response
}

/// CORS layer for the public endpoints
///
/// The payload is non-sensitive aggregate counts; any origin may read it.
#[must_use]
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET])
}

/// Extract client IP from request
fn get_client_ip(request: &Request) -> String {
    // Try X-Forwarded-For first (common in load balancers/proxies)
    if let Some(forwarded_for) = request.headers().get("X-Forwarded-For")
        && let Ok(forwarded_str) = forwarded_for.to_str()
        && let Some(first_ip) = forwarded_str.split(',').next()
    {
        return first_ip.trim().to_string();
    }

    // Try X-Real-IP
    if let Some(real_ip) = request.headers().get("X-Real-IP")
        && let Ok(real_ip_str) = real_ip.to_str()
    {
        return real_ip_str.to_string();
    }

    // Clients behind no proxy share one bucket
    "unknown".to_string()
}
