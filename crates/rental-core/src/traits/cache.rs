//! Cache provider trait for pluggable counter backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends (Redis or in-memory) holding windowed counters.
///
/// A counter's window starts when it is created and does not slide on
/// later increments. Once the window has passed the counter is gone and the
/// next increment starts a new one.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Increment a counter and return the new value, creating it at 1 with
    /// the given window when absent. Increment and expiry are one atomic step.
    async fn incr_window(&self, key: &str, window: Duration) -> AppResult<i64>;

    /// Decrement a live counter and return the new value. A missing counter
    /// is left missing and reads as 0.
    async fn decr_window(&self, key: &str) -> AppResult<i64>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
