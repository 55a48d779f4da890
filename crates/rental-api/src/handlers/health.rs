//! Health check handler.

use axum::Json;
use axum::extract::State;

use rental_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "unavailable"
        }
    };
    let cache = match state.cache.health_check().await {
        Ok(true) => "available",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "Cache health check failed");
            "unavailable"
        }
    };
    let storage = match state.storage.health_check().await {
        Ok(true) => "available",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            "unavailable"
        }
    };
    let status = if database == "connected" && cache == "available" && storage == "available" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
        storage: format!("{storage} ({})", state.storage.provider_type()),
    }))
}
