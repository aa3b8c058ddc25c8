//! Rolling-window aggregation over daily buckets

use std::sync::Arc;

use chrono::Utc;
use rustc_hash::FxHashMap;
use services_common::{
    LONG_WINDOW_DAYS, SHORT_WINDOW_DAYS, StatsError, format_bucket_date, today_utc, window_dates,
};

use crate::models::{TradeCount, WidgetStats};
use crate::store::CounterStore;

/// Computes rolling totals from the counter store
///
/// Every read is computed fresh from one batched fetch. Response
/// caching is the HTTP layer's concern; a store failure fails the whole
/// read, there are no retries and no partial results.
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn CounterStore>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Rolling 7/30-day totals for the public widget
    ///
    /// The 7-day window is the prefix of the 30-day window, so
    /// `trades_7d <= trades_30d` holds for any store state.
    pub async fn widget_stats(&self) -> Result<WidgetStats, StatsError> {
        let dates = window_dates(today_utc(), LONG_WINDOW_DAYS);
        let counts = self.store.get_many(&dates).await?;

        let window_total = |days: usize| -> i64 {
            dates[..days]
                .iter()
                .map(|date| counts.get(date).copied().unwrap_or(0))
                .sum()
        };

        Ok(WidgetStats {
            trades_7d: window_total(SHORT_WINDOW_DAYS as usize),
            trades_30d: window_total(LONG_WINDOW_DAYS as usize),
            last_updated: Utc::now(),
        })
    }

    /// Arbitrary-window total with the per-day breakdown
    ///
    /// Diagnostics path, not the widget path. Days with no recorded
    /// trades appear in the breakdown with a count of 0.
    pub async fn trade_count(&self, days: u32) -> Result<TradeCount, StatsError> {
        let dates = window_dates(today_utc(), days);
        let counts = self.store.get_many(&dates).await?;

        let mut daily = FxHashMap::default();
        let mut total = 0;
        for date in &dates {
            let count = counts.get(date).copied().unwrap_or(0);
            total += count;
            daily.insert(format_bucket_date(*date), count);
        }

        Ok(TradeCount { total, daily })
    }
}
