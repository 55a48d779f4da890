//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use rental_auth::JwtDecoder;
use rental_cache::CacheManager;
use rental_core::config::AppConfig;
use rental_service::{
    AdvertisementService, CatalogService, CategoryService, ModerationService, PaymentService,
    PhoneRevealService,
};
use rental_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Blob storage for advertisement media
    pub storage: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub advertisement_service: Arc<AdvertisementService>,
    pub catalog_service: Arc<CatalogService>,
    pub category_service: Arc<CategoryService>,
    pub moderation_service: Arc<ModerationService>,
    pub phone_service: Arc<PhoneRevealService>,
    pub payment_service: Arc<PaymentService>,
}
