//! Subscription fee payment.
//!
//! Paying sets the flag that allows exactly one advertisement to be
//! created; creating it clears the flag again.

use std::sync::Arc;

use tracing::info;

use rental_core::error::DomainError;
use rental_core::result::AppResult;
use rental_database::repositories::user::UserRepository;

use crate::context::RequestContext;

/// Records subscription fee payments.
#[derive(Debug, Clone)]
pub struct PaymentService {
    user_repo: Arc<UserRepository>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Mark the caller's subscription fee as paid.
    pub async fn pay_subscription_fee(&self, ctx: &RequestContext) -> AppResult<()> {
        if self.user_repo.mark_subscription_paid(ctx.user_id).await? {
            info!(user_id = %ctx.user_id, "Subscription fee paid");
            return Ok(());
        }

        match self.user_repo.find_by_id(ctx.user_id).await? {
            Some(_) => Err(DomainError::AlreadyPaid.into()),
            None => Err(DomainError::UserNotFound.into()),
        }
    }
}
