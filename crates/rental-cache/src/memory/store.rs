//! In-memory counters backed by moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};

use rental_core::config::cache::MemoryCacheConfig;
use rental_core::result::AppResult;
use rental_core::traits::cache::CacheProvider;

/// Counter value together with the window it was opened with.
#[derive(Debug, Clone, Copy)]
struct Counter {
    value: i64,
    window: Duration,
}

/// Expires a counter one window after creation; updates keep the deadline.
struct FixedWindow;

impl Expiry<String, Counter> for FixedWindow {
    fn expire_after_create(
        &self,
        _key: &String,
        counter: &Counter,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(counter.window)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        _counter: &Counter,
        _updated_at: Instant,
        remaining: Option<Duration>,
    ) -> Option<Duration> {
        remaining
    }
}

/// In-memory cache provider using moka.
///
/// Each counter is a moka entry with its own expiry, so expired windows are
/// evicted by moka rather than lingering until the key is touched again.
/// Updates go through `and_compute_with`, which is atomic per key.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    counters: Cache<String, Counter>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let counters = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(FixedWindow)
            .build();
        Self { counters }
    }
}

fn value_of(result: CompResult<String, Counter>) -> i64 {
    match result {
        CompResult::Inserted(entry)
        | CompResult::ReplacedWith(entry)
        | CompResult::Unchanged(entry) => entry.into_value().value,
        _ => 0,
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn incr_window(&self, key: &str, window: Duration) -> AppResult<i64> {
        let result = self
            .counters
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let next = match current {
                    Some(entry) => {
                        let counter = entry.into_value();
                        Counter {
                            value: counter.value + 1,
                            ..counter
                        }
                    }
                    None => Counter { value: 1, window },
                };
                std::future::ready(Op::Put(next))
            })
            .await;
        Ok(value_of(result))
    }

    async fn decr_window(&self, key: &str) -> AppResult<i64> {
        let result = self
            .counters
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) => {
                        let counter = entry.into_value();
                        Op::Put(Counter {
                            value: counter.value - 1,
                            ..counter
                        })
                    }
                    None => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;
        Ok(value_of(result))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
