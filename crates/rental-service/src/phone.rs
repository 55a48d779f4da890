//! Phone-number reveal with per-user hourly and daily limits.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rental_cache::CacheManager;
use rental_cache::keys;
use rental_core::config::RateLimitConfig;
use rental_core::error::DomainError;
use rental_core::result::AppResult;
use rental_core::traits::cache::CacheProvider;
use rental_core::types::{AdvertisementId, UserId};
use rental_database::repositories::catalog::CatalogRepository;

use crate::context::RequestContext;

/// The owner's phone number of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub phone_number: String,
}

/// Fixed-window counters keyed by the caller.
///
/// Each window starts at the caller's first reveal and lasts the configured
/// number of seconds. A reveal is counted first and compared afterwards, so
/// concurrent reveals cannot both slip under the limit; a rejected reveal
/// is taken back out of the counters.
#[derive(Debug, Clone)]
pub struct RevealLimiter {
    cache: Arc<CacheManager>,
    limits: RateLimitConfig,
}

impl RevealLimiter {
    /// Creates a limiter over the given cache.
    pub fn new(cache: Arc<CacheManager>, limits: RateLimitConfig) -> Self {
        Self { cache, limits }
    }

    /// Count one reveal, or reject the caller if either window is exhausted.
    pub async fn check_and_record(&self, user_id: UserId) -> AppResult<()> {
        let hourly_key = keys::phone_reveal_hourly(user_id);
        let daily_key = keys::phone_reveal_daily(user_id);

        let hourly = self
            .cache
            .incr_window(
                &hourly_key,
                Duration::from_secs(self.limits.phone_hourly_window_seconds),
            )
            .await?;
        if hourly > self.limits.phone_hourly_limit {
            self.cache.decr_window(&hourly_key).await?;
            debug!(user_id = %user_id, "Hourly phone reveal limit reached");
            return Err(DomainError::HourlyRateLimit.into());
        }

        let daily = self
            .cache
            .incr_window(
                &daily_key,
                Duration::from_secs(self.limits.phone_daily_window_seconds),
            )
            .await?;
        if daily > self.limits.phone_daily_limit {
            self.cache.decr_window(&daily_key).await?;
            self.cache.decr_window(&hourly_key).await?;
            debug!(user_id = %user_id, "Daily phone reveal limit reached");
            return Err(DomainError::DailyRateLimit.into());
        }
        Ok(())
    }
}

/// Reveals listing owners' phone numbers to signed-in users.
#[derive(Debug, Clone)]
pub struct PhoneRevealService {
    catalog_repo: Arc<CatalogRepository>,
    limiter: RevealLimiter,
}

impl PhoneRevealService {
    /// Creates a new phone reveal service.
    pub fn new(catalog_repo: Arc<CatalogRepository>, limiter: RevealLimiter) -> Self {
        Self {
            catalog_repo,
            limiter,
        }
    }

    /// Return the owner's phone number of a visible listing.
    pub async fn reveal(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
    ) -> AppResult<PhoneNumber> {
        let phone_number = self
            .catalog_repo
            .visible_phone_number(id)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;

        self.limiter.check_and_record(ctx.user_id).await?;

        info!(user_id = %ctx.user_id, advertisement_id = %id, "Phone number revealed");
        Ok(PhoneNumber { phone_number })
    }
}
