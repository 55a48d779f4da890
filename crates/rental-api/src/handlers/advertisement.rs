//! Public catalog and listing submission handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;

use rental_core::types::AdvertisementId;

use crate::dto::request::CatalogQuery;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ListingForm};
use crate::state::AppState;

/// POST /api/advertisements
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    form: ListingForm,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let (input, images, video) = form.into_new()?;
    let created = state
        .advertisement_service
        .create(&auth, input, images, video)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

/// GET /api/advertisements
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let (filter, page) = query.split(&state.config.catalog)?;
    let result = state.catalog_service.published(&filter, &page).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

/// GET /api/advertisements/most-viewed
pub async fn most_viewed(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let items = state.catalog_service.most_viewed().await?;
    Ok(Json(json!({ "success": true, "data": items })))
}

/// GET /api/advertisements/recent
pub async fn recent(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let items = state.catalog_service.recent().await?;
    Ok(Json(json!({ "success": true, "data": items })))
}

/// GET /api/advertisements/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = state.catalog_service.detail(id).await?;
    Ok(Json(json!({ "success": true, "data": detail })))
}

/// GET /api/advertisements/{id}/phone-number
pub async fn phone_number(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<Json<serde_json::Value>> {
    let phone = state.phone_service.reveal(&auth, id).await?;
    Ok(Json(json!({ "success": true, "data": phone })))
}
