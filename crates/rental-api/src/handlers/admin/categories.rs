//! Admin category handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;

use crate::dto::request::{CategoryRequest, CategorySearchQuery};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::middleware::validation::validate_body;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    require_admin(&auth)?;
    validate_body(&req)?;
    let category = state.category_service.create(&auth, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": category })),
    ))
}

/// GET /api/admin/categories
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    let page = params.into_page_request(&state.config.catalog);
    let result = state.category_service.list(&auth, &page).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

/// GET /api/admin/categories/search?name=
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CategorySearchQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    let names = state.category_service.search(&auth, &query.name).await?;
    Ok(Json(json!({ "success": true, "data": names })))
}

/// GET /api/admin/categories/{slug}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    let category = state.category_service.get(&auth, &slug).await?;
    Ok(Json(json!({ "success": true, "data": category })))
}

/// PUT /api/admin/categories/{slug}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    validate_body(&req)?;
    let category = state
        .category_service
        .update(&auth, &slug, req.into())
        .await?;
    Ok(Json(json!({ "success": true, "data": category })))
}

/// DELETE /api/admin/categories/{slug}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.category_service.delete(&auth, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
