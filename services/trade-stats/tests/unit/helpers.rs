//! Shared test doubles

use async_trait::async_trait;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use services_common::StatsError;
use trade_stats_service::store::CounterStore;

/// Counter store whose every operation fails, simulating an
/// unreachable backend
pub struct FailingCounterStore;

#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn increment(&self, _date: NaiveDate) -> Result<i64, StatsError> {
        Err(StatsError::StoreUnavailable("connection refused".to_string()))
    }

    async fn get_many(
        &self,
        _dates: &[NaiveDate],
    ) -> Result<FxHashMap<NaiveDate, i64>, StatsError> {
        Err(StatsError::StoreUnavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StatsError> {
        Err(StatsError::StoreUnavailable("connection refused".to_string()))
    }
}
