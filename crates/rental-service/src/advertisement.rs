//! Advertisement writer: create, update and delete listings.
//!
//! Every write validates first, then commits all relational changes in one
//! transaction, then uploads media. Upload failures after commit surface
//! as [`DomainError::UploadFailed`] and leave the committed rows in place.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use rental_core::error::{AppError, DomainError};
use rental_core::result::AppResult;
use rental_core::types::AdvertisementId;
use rental_database::repositories::advertisement::{
    AdvertisementRepository, NewAdvertisementRecord, ReplaceAdvertisementRecord, VideoChange,
};
use rental_database::repositories::user::UserRepository;
use rental_entity::advertisement::PriceTiers;
use rental_storage::StorageManager;

use crate::context::RequestContext;
use crate::media::{MediaValidator, UploadedFile, ValidatedMedia};
use crate::pricing::validate_pricing;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 250;

/// Text, price and calendar fields of a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub place: String,
    pub category_name: String,
    pub prices: PriceTiers,
    pub days: Vec<NaiveDate>,
}

/// Fields of a resubmitted listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdvertisement {
    pub title: String,
    pub description: String,
    pub place: String,
    pub category_name: String,
    pub prices: PriceTiers,
    pub days: Vec<NaiveDate>,
    /// Keys of stored images to keep.
    pub previous_images: Vec<String>,
    /// Key of the stored video to keep when no new video is uploaded.
    pub previous_video: Option<String>,
}

/// Returned after a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAdvertisement {
    pub id: AdvertisementId,
    pub title: String,
    pub description: String,
    pub place: String,
}

/// Creates, resubmits and deletes advertisements.
#[derive(Debug, Clone)]
pub struct AdvertisementService {
    ad_repo: Arc<AdvertisementRepository>,
    user_repo: Arc<UserRepository>,
    storage: Arc<StorageManager>,
    media: MediaValidator,
}

impl AdvertisementService {
    /// Creates a new advertisement service.
    pub fn new(
        ad_repo: Arc<AdvertisementRepository>,
        user_repo: Arc<UserRepository>,
        storage: Arc<StorageManager>,
        media: MediaValidator,
    ) -> Self {
        Self {
            ad_repo,
            user_repo,
            storage,
            media,
        }
    }

    /// Create a listing for the caller and consume their subscription fee.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewAdvertisement,
        images: Vec<UploadedFile>,
        video: Option<UploadedFile>,
    ) -> AppResult<CreatedAdvertisement> {
        // Fast path only; the fee is consumed atomically inside the transaction.
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        if !user.has_subscription_fee {
            return Err(DomainError::PaymentRequired.into());
        }

        check_text(&input.title, &input.description, &input.place)?;
        let media = self.media.validate(images, video, 0)?;
        validate_pricing(&input.prices, &input.days)?;

        let id = AdvertisementId::new();
        self.ad_repo
            .create_with_media(&NewAdvertisementRecord {
                id,
                user_id: ctx.user_id,
                title: input.title.clone(),
                description: input.description.clone(),
                place: input.place.clone(),
                category_name: input.category_name,
                prices: input.prices,
                video: media.video.as_ref().map(|v| v.key.clone()),
                image_keys: media.image_keys(),
                days: input.days,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            advertisement_id = %id,
            images = media.images.len(),
            video = media.video.is_some(),
            "Advertisement created"
        );

        self.upload(id, &media).await?;

        Ok(CreatedAdvertisement {
            id,
            title: input.title,
            description: input.description,
            place: input.place,
        })
    }

    /// Resubmit a listing that a moderator sent back for revision.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
        input: UpdateAdvertisement,
        images: Vec<UploadedFile>,
        video: Option<UploadedFile>,
    ) -> AppResult<()> {
        let current = self
            .ad_repo
            .find_by_id(id)
            .await?
            .filter(|ad| ad.is_owned_by(ctx.user_id) && !ad.is_deleted)
            .ok_or(DomainError::AdvertisementNotFound)?;
        if !current.awaits_revision() {
            return Err(DomainError::NotEligibleForUpdate.into());
        }

        let stored = self.ad_repo.image_keys(id).await?;
        let mut retained: Vec<String> = Vec::new();
        for key in input.previous_images {
            if stored.contains(&key) && !retained.contains(&key) {
                retained.push(key);
            }
        }

        check_text(&input.title, &input.description, &input.place)?;
        let media = self.media.validate(images, video, retained.len())?;
        validate_pricing(&input.prices, &input.days)?;

        let video_change = match &media.video {
            Some(blob) => VideoChange::Replace(blob.key.clone()),
            None => VideoChange::Retain(input.previous_video),
        };

        let detached = self
            .ad_repo
            .replace_with_media(&ReplaceAdvertisementRecord {
                id,
                user_id: ctx.user_id,
                title: input.title,
                description: input.description,
                place: input.place,
                category_name: input.category_name,
                prices: input.prices,
                video: video_change,
                new_image_keys: media.image_keys(),
                retained_image_keys: retained,
                days: input.days,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            advertisement_id = %id,
            new_images = media.images.len(),
            detached_images = detached.images.len(),
            "Advertisement resubmitted"
        );

        let uploaded = self.upload(id, &media).await;
        self.storage.delete_best_effort(detached.into_keys()).await;
        uploaded
    }

    /// Soft-delete one of the caller's listings.
    pub async fn owner_delete(&self, ctx: &RequestContext, id: AdvertisementId) -> AppResult<()> {
        if !self.ad_repo.soft_delete(id, ctx.user_id).await? {
            return Err(DomainError::NotOwner.into());
        }
        info!(user_id = %ctx.user_id, advertisement_id = %id, "Advertisement deleted by owner");
        Ok(())
    }

    /// Remove a listing with its images and days, then its blobs.
    pub async fn admin_delete(&self, ctx: &RequestContext, id: AdvertisementId) -> AppResult<()> {
        ctx.require_admin()?;
        let detached = self
            .ad_repo
            .hard_delete(id)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;

        info!(admin_id = %ctx.user_id, advertisement_id = %id, "Advertisement removed");
        self.storage.delete_best_effort(detached.into_keys()).await;
        Ok(())
    }

    async fn upload(&self, id: AdvertisementId, media: &ValidatedMedia) -> AppResult<()> {
        for blob in media.blobs() {
            if let Err(e) = self
                .storage
                .put(&blob.key, &blob.content_type, blob.bytes.clone())
                .await
            {
                error!(advertisement_id = %id, key = %blob.key, error = %e, "Media upload failed");
                return Err(AppError::domain_with_source(DomainError::UploadFailed, e));
            }
        }
        Ok(())
    }
}

fn check_text(title: &str, description: &str, place: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::validation(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    if description.trim().is_empty() {
        return Err(AppError::validation("Description is required"));
    }
    if place.trim().is_empty() {
        return Err(AppError::validation("Place is required"));
    }
    Ok(())
}
