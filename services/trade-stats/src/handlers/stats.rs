//! Widget stats and trade-count handlers

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;

use crate::aggregator::StatsAggregator;
use crate::models::ApiResponse;
use services_common::{BUCKET_RETENTION_DAYS, LONG_WINDOW_DAYS, WIDGET_CACHE_CONTROL};

/// Stats endpoint handlers
#[derive(Clone)]
pub struct StatsHandlers {
    aggregator: StatsAggregator,
}

/// Query parameters for the trade-count diagnostics endpoint
#[derive(Debug, Deserialize)]
pub struct TradeCountQuery {
    /// Window length in days; defaults to the long widget window
    pub days: Option<u32>,
}

impl StatsHandlers {
    #[must_use]
    pub fn new(aggregator: StatsAggregator) -> Self {
        Self { aggregator }
    }

    /// Public widget stats endpoint
    ///
    /// The short cache-control freshness window is the primary defense
    /// against read amplification; the aggregator itself never caches.
    pub async fn widget_stats(State(handlers): State<Self>) -> Response {
        match handlers.aggregator.widget_stats().await {
            Ok(stats) => (
                StatusCode::OK,
                [(header::CACHE_CONTROL, WIDGET_CACHE_CONTROL)],
                Json(ApiResponse::success(stats, "Widget stats retrieved")),
            )
                .into_response(),
            Err(err) => {
                error!("Widget stats read failed: {}", err);
                stats_unavailable_response()
            }
        }
    }

    /// Per-day trade counts over an arbitrary window, for diagnostics
    pub async fn trade_count(
        State(handlers): State<Self>,
        Query(query): Query<TradeCountQuery>,
    ) -> Response {
        // Windows past the retention horizon would only read expired
        // buckets, so clamp instead of erroring.
        let days = query
            .days
            .unwrap_or(LONG_WINDOW_DAYS)
            .clamp(1, BUCKET_RETENTION_DAYS);

        match handlers.aggregator.trade_count(days).await {
            Ok(count) => (
                StatusCode::OK,
                [(header::CACHE_CONTROL, WIDGET_CACHE_CONTROL)],
                Json(ApiResponse::success(count, "Trade counts retrieved")),
            )
                .into_response(),
            Err(err) => {
                error!("Trade count read failed: {}", err);
                stats_unavailable_response()
            }
        }
    }
}

/// Generic failure envelope for a failed store read; never a partial
/// aggregate
fn stats_unavailable_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiResponse::<()>::error("Stats temporarily unavailable")),
    )
        .into_response()
}
