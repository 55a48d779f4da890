//! Subscription fee handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/payments/subscription-fee
pub async fn pay_subscription_fee(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<StatusCode> {
    state.payment_service.pay_subscription_fee(&auth).await?;
    Ok(StatusCode::NO_CONTENT)
}
