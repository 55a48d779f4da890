//! Admin moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;

use rental_core::types::AdvertisementId;

use crate::dto::request::CommentRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::middleware::validation::validate_body;
use crate::state::AppState;

/// GET /api/admin/advertisements
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    let page = params.into_page_request(&state.config.catalog);
    let result = state.catalog_service.admin_listings(&auth, &page).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

/// GET /api/admin/advertisements/{id}
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&auth)?;
    let detail = state.catalog_service.admin_detail(&auth, id).await?;
    Ok(Json(json!({ "success": true, "data": detail })))
}

/// POST /api/admin/advertisements/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.moderation_service.publish(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/advertisements/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.moderation_service.unpublish(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/advertisements/{id}/comment
pub async fn comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    validate_body(&req)?;
    state
        .moderation_service
        .comment(&auth, id, &req.comment)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/advertisements/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AdvertisementId>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.moderation_service.remove(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
