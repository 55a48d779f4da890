//! Handlers for the caller's own listings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;

use rental_core::types::AdvertisementId;

use crate::error::ApiResult;
use crate::extractors::{AuthUser, ListingForm};
use crate::state::AppState;

/// GET /api/my/advertisements
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let items = state.catalog_service.owner_listings(&auth).await?;
    Ok(Json(json!({ "success": true, "data": items })))
}

/// GET /api/my/advertisements/{id}
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = state.catalog_service.owner_detail(&auth, id).await?;
    Ok(Json(json!({ "success": true, "data": detail })))
}

/// PUT /api/my/advertisements/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
    form: ListingForm,
) -> ApiResult<StatusCode> {
    let (input, images, video) = form.into_update()?;
    state
        .advertisement_service
        .update(&auth, id, input, images, video)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/my/advertisements/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<StatusCode> {
    state.advertisement_service.owner_delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
