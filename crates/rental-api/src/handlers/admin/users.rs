//! Admin user handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use rental_core::types::UserId;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/users/{id}/ban
pub async fn ban(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.moderation_service.ban_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/users/{id}/unban
pub async fn unban(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<StatusCode> {
    require_admin(&auth)?;
    state.moderation_service.unban_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
