//! Counter storage backends for daily trade buckets
//!
//! All persisted state lives behind [`CounterStore`]. Correctness rests
//! on the backend's atomic increment and single-round-trip batched
//! read; no in-process locking is involved.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use redis::AsyncCommands;
use rustc_hash::FxHashMap;
use services_common::{BUCKET_TTL_SECS, StatsError, TRADE_COUNT_NAMESPACE, format_bucket_date};
use tokio::sync::Mutex;
use tracing::debug;

/// Storage key for a date's bucket
#[must_use]
pub fn bucket_key(date: NaiveDate) -> String {
    format!("{TRADE_COUNT_NAMESPACE}:{}", format_bucket_date(date))
}

/// Atomic per-day counter store
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment the bucket for `date` and return the
    /// post-increment value. The increment is linearizable across
    /// concurrent callers. The first increment for a date fixes the
    /// bucket's expiry; later increments never extend it.
    async fn increment(&self, date: NaiveDate) -> Result<i64, StatsError>;

    /// Fetch all requested buckets in a single round trip. A date with
    /// no bucket reads as 0.
    async fn get_many(
        &self,
        dates: &[NaiveDate],
    ) -> Result<FxHashMap<NaiveDate, i64>, StatsError>;

    /// Store reachability probe for health reporting
    async fn ping(&self) -> Result<(), StatsError>;
}

/// Redis-backed counter store
pub struct RedisCounterStore {
    client: redis::aio::ConnectionManager,
}

impl RedisCounterStore {
    /// Connect to Redis
    pub async fn new(url: &str) -> Result<Self, StatsError> {
        let client = redis::Client::open(url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { client: connection })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, date: NaiveDate) -> Result<i64, StatsError> {
        let key = bucket_key(date);
        let mut conn = self.client.clone();

        let count: i64 = conn.incr(&key, 1).await?;
        if count == 1 {
            // First increment created the bucket; its expiry is fixed
            // here and never touched again.
            let _: i64 = conn.expire(&key, BUCKET_TTL_SECS).await?;
        }

        debug!(key = %key, count, "bucket incremented");
        Ok(count)
    }

    async fn get_many(
        &self,
        dates: &[NaiveDate],
    ) -> Result<FxHashMap<NaiveDate, i64>, StatsError> {
        if dates.is_empty() {
            return Ok(FxHashMap::default());
        }

        let keys: Vec<String> = dates.iter().map(|date| bucket_key(*date)).collect();
        let mut conn = self.client.clone();
        let values: Vec<Option<i64>> = conn.mget(&keys).await?;

        Ok(dates
            .iter()
            .zip(values)
            .map(|(date, value)| (*date, value.unwrap_or(0)))
            .collect())
    }

    async fn ping(&self) -> Result<(), StatsError> {
        let mut conn = self.client.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// In-memory counter store
///
/// Mirrors the Redis contract, including the expiry-set-once rule, and
/// records every expiry write so tests can assert the TTL invariant.
/// Backs local development runs and the test suites.
#[derive(Default)]
pub struct MemoryCounterStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    counts: FxHashMap<String, i64>,
    expiries: FxHashMap<String, DateTime<Utc>>,
    expiry_writes: FxHashMap<String, u32>,
}

impl MemoryCounterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expiry instant recorded for a date's bucket, if the bucket exists
    pub async fn expiry_of(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.inner.lock().await.expiries.get(&bucket_key(date)).copied()
    }

    /// How many times the expiry for a date's bucket has been written
    pub async fn expiry_writes(&self, date: NaiveDate) -> u32 {
        self.inner
            .lock()
            .await
            .expiry_writes
            .get(&bucket_key(date))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite a bucket directly, as a historical backfill would
    pub async fn set_count(&self, date: NaiveDate, count: i64) {
        let mut state = self.inner.lock().await;
        let key = bucket_key(date);
        state.counts.insert(key.clone(), count);
        state.record_expiry(&key);
    }
}

impl MemoryState {
    fn record_expiry(&mut self, key: &str) {
        self.expiries
            .insert(key.to_string(), Utc::now() + Duration::seconds(BUCKET_TTL_SECS));
        *self.expiry_writes.entry(key.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, date: NaiveDate) -> Result<i64, StatsError> {
        let mut state = self.inner.lock().await;
        let key = bucket_key(date);

        let count = {
            let entry = state.counts.entry(key.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        if count == 1 {
            state.record_expiry(&key);
        }

        Ok(count)
    }

    async fn get_many(
        &self,
        dates: &[NaiveDate],
    ) -> Result<FxHashMap<NaiveDate, i64>, StatsError> {
        let state = self.inner.lock().await;
        Ok(dates
            .iter()
            .map(|date| {
                let count = state.counts.get(&bucket_key(*date)).copied().unwrap_or(0);
                (*date, count)
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StatsError> {
        Ok(())
    }
}
