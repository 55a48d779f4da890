//! Moderation workflow: publish, unpublish, comment, remove and ban.
//!
//! | From                  | Action          | To            |
//! |-----------------------|-----------------|---------------|
//! | Draft, NeedsRevision  | publish         | Published     |
//! | Published             | unpublish       | Draft, or NeedsRevision if a comment is set |
//! | any but Deleted       | comment         | NeedsRevision |
//! | NeedsRevision         | owner update    | Draft         |
//! | any but Deleted       | owner delete    | Deleted       |
//!
//! Deleted is terminal for moderation. Admin removal deletes the rows
//! entirely. Banning a user changes no listing rows; the catalog hides
//! listings of banned owners.

use std::sync::Arc;

use tracing::info;

use rental_core::error::{AppError, DomainError};
use rental_core::result::AppResult;
use rental_core::types::{AdvertisementId, UserId};
use rental_database::repositories::advertisement::AdvertisementRepository;
use rental_database::repositories::user::UserRepository;

use crate::advertisement::AdvertisementService;
use crate::context::RequestContext;

/// Admin-only transitions of the advertisement lifecycle.
#[derive(Debug, Clone)]
pub struct ModerationService {
    ad_repo: Arc<AdvertisementRepository>,
    user_repo: Arc<UserRepository>,
    writer: Arc<AdvertisementService>,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        ad_repo: Arc<AdvertisementRepository>,
        user_repo: Arc<UserRepository>,
        writer: Arc<AdvertisementService>,
    ) -> Self {
        Self {
            ad_repo,
            user_repo,
            writer,
        }
    }

    /// Make a listing visible in the catalog. Publishing twice is a no-op.
    pub async fn publish(&self, ctx: &RequestContext, id: AdvertisementId) -> AppResult<()> {
        self.set_published(ctx, id, true).await
    }

    /// Hide a listing from the catalog. Any admin comment is kept.
    pub async fn unpublish(&self, ctx: &RequestContext, id: AdvertisementId) -> AppResult<()> {
        self.set_published(ctx, id, false).await
    }

    /// Send a listing back to its owner with feedback; this also unpublishes it.
    pub async fn comment(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
        comment: &str,
    ) -> AppResult<()> {
        ctx.require_admin()?;
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DomainError::EmptyComment.into());
        }

        self.ad_repo
            .set_admin_comment(id, comment)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;

        info!(admin_id = %ctx.user_id, advertisement_id = %id, "Advertisement sent back for revision");
        Ok(())
    }

    /// Remove a listing permanently.
    pub async fn remove(&self, ctx: &RequestContext, id: AdvertisementId) -> AppResult<()> {
        self.writer.admin_delete(ctx, id).await
    }

    /// Hide every listing of a user from the catalog.
    pub async fn ban_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<()> {
        ctx.require_admin()?;
        if user_id == ctx.user_id {
            return Err(AppError::validation("Admins cannot ban themselves"));
        }
        self.set_banned(ctx, user_id, true).await
    }

    /// Lift a ban.
    pub async fn unban_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<()> {
        ctx.require_admin()?;
        self.set_banned(ctx, user_id, false).await
    }

    async fn set_published(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
        published: bool,
    ) -> AppResult<()> {
        ctx.require_admin()?;
        let before = self
            .ad_repo
            .set_published(id, published)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;

        info!(
            admin_id = %ctx.user_id,
            advertisement_id = %id,
            from = ?before.state(),
            published,
            "Publication changed"
        );
        Ok(())
    }

    async fn set_banned(&self, ctx: &RequestContext, user_id: UserId, banned: bool) -> AppResult<()> {
        if !self.user_repo.set_banned(user_id, banned).await? {
            return Err(DomainError::UserNotFound.into());
        }
        info!(admin_id = %ctx.user_id, user_id = %user_id, banned, "Ban flag changed");
        Ok(())
    }
}
