//! Counter store unit tests

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::*;

use trade_stats_service::store::{CounterStore, MemoryCounterStore, bucket_key};

#[fixture]
fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[rstest]
fn bucket_keys_are_namespaced_by_date(date: NaiveDate) {
    assert_eq!(bucket_key(date), "stats:trades:2025-06-15");
}

#[rstest]
#[tokio::test]
async fn first_increment_creates_bucket_at_one(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    let count = store.increment(date).await.unwrap();
    assert_eq!(count, 1);
}

#[rstest]
#[tokio::test]
async fn increments_accumulate_per_date(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    for expected in 1..=5 {
        let count = store.increment(date).await.unwrap();
        assert_eq!(count, expected);
    }

    let counts = store.get_many(&[date]).await.unwrap();
    assert_eq!(counts[&date], 5);
}

#[rstest]
#[tokio::test]
async fn dates_have_independent_buckets(date: NaiveDate) {
    let store = MemoryCounterStore::new();
    let other = date.succ_opt().unwrap();

    store.increment(date).await.unwrap();
    store.increment(date).await.unwrap();
    store.increment(other).await.unwrap();

    let counts = store.get_many(&[date, other]).await.unwrap();
    assert_eq!(counts[&date], 2);
    assert_eq!(counts[&other], 1);
}

#[rstest]
#[tokio::test]
async fn absent_dates_read_as_zero(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    let counts = store.get_many(&[date]).await.unwrap();
    assert_eq!(counts[&date], 0);
}

#[tokio::test]
async fn empty_batch_reads_empty() {
    let store = MemoryCounterStore::new();

    let counts = store.get_many(&[]).await.unwrap();
    assert!(counts.is_empty());
}

#[rstest]
#[tokio::test]
async fn expiry_is_set_exactly_once(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    store.increment(date).await.unwrap();
    let expiry_after_create = store.expiry_of(date).await.unwrap();

    store.increment(date).await.unwrap();
    store.increment(date).await.unwrap();

    assert_eq!(store.expiry_writes(date).await, 1);
    assert_eq!(store.expiry_of(date).await.unwrap(), expiry_after_create);
}

#[rstest]
#[tokio::test]
async fn absent_bucket_has_no_expiry(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    assert_eq!(store.expiry_of(date).await, None);
    assert_eq!(store.expiry_writes(date).await, 0);
}

#[rstest]
#[tokio::test]
async fn backfilled_buckets_read_like_live_ones(date: NaiveDate) {
    let store = MemoryCounterStore::new();

    // A backfill job sets bucket values directly; subsequent live
    // increments continue from the seeded value.
    store.set_count(date, 40).await;
    let count = store.increment(date).await.unwrap();
    assert_eq!(count, 41);

    let counts = store.get_many(&[date]).await.unwrap();
    assert_eq!(counts[&date], 41);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    use std::sync::Arc;

    let store = Arc::new(MemoryCounterStore::new());
    let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.increment(date).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let counts = store.get_many(&[date]).await.unwrap();
    assert_eq!(counts[&date], 50);
}
