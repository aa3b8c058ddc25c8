//! Fire-and-forget trade counting

use std::sync::Arc;

use services_common::{StatsError, today_utc};
use tracing::{debug, warn};

use crate::store::CounterStore;

/// Sink receiving failures from detached increments
pub type ErrorSink = Arc<dyn Fn(StatsError) + Send + Sync>;

/// Records completed trades into today's UTC bucket
///
/// Invoked once per trade-creation event, only after the trade's
/// durable persistence succeeds. The detached form never blocks the
/// trade path and never surfaces a failure to it: a lost increment
/// under a transiently unavailable store is accepted, a delayed or
/// failed trade write is not.
pub struct TradeRecorder {
    store: Arc<dyn CounterStore>,
    error_sink: ErrorSink,
}

impl TradeRecorder {
    /// Recorder with the default sink, which logs failures and drops them
    #[must_use]
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self::with_error_sink(
            store,
            Arc::new(|err| warn!("Trade count increment failed: {}", err)),
        )
    }

    /// Recorder with a custom failure sink
    #[must_use]
    pub fn with_error_sink(store: Arc<dyn CounterStore>, error_sink: ErrorSink) -> Self {
        Self { store, error_sink }
    }

    /// Increment today's bucket and return the new count
    pub async fn record(&self) -> Result<i64, StatsError> {
        self.store.increment(today_utc()).await
    }

    /// Submit the increment on a detached task and return immediately
    ///
    /// The outcome goes to the error sink, never to the caller.
    pub fn record_detached(&self) {
        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.error_sink);

        tokio::spawn(async move {
            match store.increment(today_utc()).await {
                Ok(count) => debug!(count, "trade recorded"),
                Err(err) => sink(err),
            }
        });
    }
}
