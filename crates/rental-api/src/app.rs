//! Application builder: wires repositories, services and the router.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tracing::info;

use rental_auth::JwtDecoder;
use rental_cache::CacheManager;
use rental_core::config::AppConfig;
use rental_database::repositories::{
    AdvertisementRepository, CatalogRepository, CategoryRepository, UserRepository,
};
use rental_service::media::MediaValidator;
use rental_service::phone::RevealLimiter;
use rental_service::{
    AdvertisementService, CatalogService, CategoryService, ModerationService, PaymentService,
    PhoneRevealService,
};
use rental_storage::StorageManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from already connected infrastructure.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    cache: Arc<CacheManager>,
    storage: Arc<StorageManager>,
) -> AppState {
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let ad_repo = Arc::new(AdvertisementRepository::new(db_pool.clone()));
    let catalog_repo = Arc::new(CatalogRepository::new(db_pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(db_pool.clone()));

    let advertisement_service = Arc::new(AdvertisementService::new(
        ad_repo.clone(),
        user_repo.clone(),
        storage.clone(),
        MediaValidator::new(config.media.clone()),
    ));
    let catalog_service = Arc::new(CatalogService::new(
        catalog_repo.clone(),
        ad_repo.clone(),
        config.storage.clone(),
        config.catalog.clone(),
    ));
    let moderation_service = Arc::new(ModerationService::new(
        ad_repo,
        user_repo.clone(),
        advertisement_service.clone(),
    ));
    let phone_service = Arc::new(PhoneRevealService::new(
        catalog_repo,
        RevealLimiter::new(cache.clone(), config.rate_limit.clone()),
    ));

    AppState {
        jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
        category_service: Arc::new(CategoryService::new(category_repo)),
        payment_service: Arc::new(PaymentService::new(user_repo)),
        advertisement_service,
        catalog_service,
        moderation_service,
        phone_service,
        config: Arc::new(config),
        db_pool,
        cache,
        storage,
    }
}

/// Builds the complete Axum application.
///
/// With the local storage provider, stored media is also served under
/// `/media`.
pub fn build_app(state: AppState) -> Router {
    let storage = &state.config.storage;
    let media_root = (storage.provider == "local").then(|| storage.local.root_path.clone());

    let app = build_router(state);
    match media_root {
        Some(root) => {
            info!(root = %root, "Serving local media under /media");
            app.nest_service("/media", ServeDir::new(root))
        }
        None => app,
    }
}
