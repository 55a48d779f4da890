//! Redis cache provider implementation.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use redis::Script;

use rental_core::error::{AppError, ErrorKind};
use rental_core::result::AppResult;
use rental_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// `INCR` and, for a key without a TTL, `PEXPIRE`, run as one script.
static INCR_WINDOW: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
local value = redis.call('INCR', KEYS[1])
if redis.call('PTTL', KEYS[1]) < 0 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return value
",
    )
});

/// `DECR` only while the key exists, so an expired window is not revived
/// without a TTL.
static DECR_WINDOW: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
if redis.call('EXISTS', KEYS[1]) == 1 then
  return redis.call('DECR', KEYS[1])
end
return 0
",
    )
});

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn incr_window(&self, key: &str, window: Duration) -> AppResult<i64> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn();
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX).max(1);
        INCR_WINDOW
            .key(&full_key)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)
    }

    async fn decr_window(&self, key: &str) -> AppResult<i64> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn();
        DECR_WINDOW
            .key(&full_key)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
