//! Phone-number reveal limits.

use serde::{Deserialize, Serialize};

/// Counters applied before an owner's phone number is shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Reveals allowed per user inside the hourly window.
    #[serde(default = "default_hourly_limit")]
    pub phone_hourly_limit: i64,
    /// Length of the hourly window in seconds.
    #[serde(default = "default_hourly_window")]
    pub phone_hourly_window_seconds: u64,
    /// Reveals allowed per user inside the daily window.
    #[serde(default = "default_daily_limit")]
    pub phone_daily_limit: i64,
    /// Length of the daily window in seconds.
    #[serde(default = "default_daily_window")]
    pub phone_daily_window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            phone_hourly_limit: default_hourly_limit(),
            phone_hourly_window_seconds: default_hourly_window(),
            phone_daily_limit: default_daily_limit(),
            phone_daily_window_seconds: default_daily_window(),
        }
    }
}

fn default_hourly_limit() -> i64 {
    5
}

fn default_hourly_window() -> u64 {
    3600
}

fn default_daily_limit() -> i64 {
    20
}

fn default_daily_window() -> u64 {
    86_400
}
