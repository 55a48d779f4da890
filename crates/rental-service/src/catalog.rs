//! Catalog reads: the public listing, detail pages, highlights, and the
//! owner and admin views.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rental_core::config::{CatalogConfig, StorageConfig};
use rental_core::error::DomainError;
use rental_core::result::AppResult;
use rental_core::types::pagination::{PageRequest, PageResponse};
use rental_core::types::{AdvertisementId, UserId};
use rental_database::repositories::advertisement::AdvertisementRepository;
use rental_database::repositories::catalog::{CatalogRepository, Highlight};
use rental_entity::advertisement::views::{
    AdminListingRow, AdvertisementDetailRow, HighlightRow, OwnerListingRow, PublishedListingRow,
};
use rental_entity::advertisement::{CatalogFilter, ModerationState};

use crate::context::RequestContext;

/// One entry of the public catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    pub id: AdvertisementId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub hour_price: Option<f64>,
    pub day_price: Option<f64>,
    pub week_price: Option<f64>,
    pub month_price: Option<f64>,
    pub category_name: Option<String>,
    pub image: Option<String>,
}

/// One entry of the caller's own listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerListing {
    pub id: AdvertisementId,
    pub title: String,
    pub admin_comment: Option<String>,
    pub views: i64,
    pub published: bool,
    pub image: Option<String>,
}

/// One entry of the most-viewed and recent lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightListing {
    pub id: AdvertisementId,
    pub title: String,
    pub place: String,
    pub views: i64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One entry of the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListing {
    pub id: AdvertisementId,
    pub title: String,
    pub phone_number: String,
    pub published: bool,
    pub is_deleted: bool,
    pub admin_comment: Option<String>,
    pub state: ModerationState,
    pub created_at: DateTime<Utc>,
}

/// Full view of one listing.
///
/// Moderation fields are only filled for the owner and admin views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementDetail {
    pub id: AdvertisementId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub views: i64,
    pub video: Option<String>,
    pub hour_price: Option<f64>,
    pub day_price: Option<f64>,
    pub week_price: Option<f64>,
    pub month_price: Option<f64>,
    pub category_name: Option<String>,
    pub image_urls: Vec<String>,
    pub days: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ModerationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Who a detail view is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    Public,
    Owner,
    Admin,
}

/// Read side of the advertisement engine.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog_repo: Arc<CatalogRepository>,
    ad_repo: Arc<AdvertisementRepository>,
    storage: StorageConfig,
    config: CatalogConfig,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        catalog_repo: Arc<CatalogRepository>,
        ad_repo: Arc<AdvertisementRepository>,
        storage: StorageConfig,
        config: CatalogConfig,
    ) -> Self {
        Self {
            catalog_repo,
            ad_repo,
            storage,
            config,
        }
    }

    /// Filtered, paginated public catalog.
    pub async fn published(
        &self,
        filter: &CatalogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ListingSummary>> {
        debug!(?filter, page = page.page, per_page = page.per_page, "Catalog query");
        let rows = self.catalog_repo.published(filter, page).await?;
        Ok(rows.map(|row| self.summary(row)))
    }

    /// The caller's listings in any publication state.
    pub async fn owner_listings(&self, ctx: &RequestContext) -> AppResult<Vec<OwnerListing>> {
        let rows = self.catalog_repo.owner_listings(ctx.user_id).await?;
        Ok(rows.into_iter().map(|row| self.owner_listing(row)).collect())
    }

    /// Most viewed published listings.
    pub async fn most_viewed(&self) -> AppResult<Vec<HighlightListing>> {
        self.highlights(Highlight::MostViewed).await
    }

    /// Newest published listings.
    pub async fn recent(&self) -> AppResult<Vec<HighlightListing>> {
        self.highlights(Highlight::Recent).await
    }

    /// Public detail of a listing. Counts a view on a best-effort basis.
    pub async fn detail(&self, id: AdvertisementId) -> AppResult<AdvertisementDetail> {
        let row = self
            .catalog_repo
            .published_detail(id)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;

        if let Err(e) = self.ad_repo.increment_views(id).await {
            warn!(advertisement_id = %id, error = %e, "Failed to count view");
        }

        self.assemble(row, Audience::Public).await
    }

    /// Detail of one of the caller's listings, including moderation fields.
    pub async fn owner_detail(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
    ) -> AppResult<AdvertisementDetail> {
        let row = self
            .catalog_repo
            .owner_detail(id, ctx.user_id)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;
        self.assemble(row, Audience::Owner).await
    }

    /// Paginated list of every advertisement for moderators.
    pub async fn admin_listings(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AdminListing>> {
        ctx.require_admin()?;
        let rows = self.catalog_repo.admin_listings(page).await?;
        Ok(rows.map(admin_listing))
    }

    /// Detail of any advertisement regardless of state.
    pub async fn admin_detail(
        &self,
        ctx: &RequestContext,
        id: AdvertisementId,
    ) -> AppResult<AdvertisementDetail> {
        ctx.require_admin()?;
        let row = self
            .catalog_repo
            .admin_detail(id)
            .await?
            .ok_or(DomainError::AdvertisementNotFound)?;
        self.assemble(row, Audience::Admin).await
    }

    async fn highlights(&self, kind: Highlight) -> AppResult<Vec<HighlightListing>> {
        let rows = self
            .catalog_repo
            .highlights(kind, self.config.highlight_limit)
            .await?;
        Ok(rows.into_iter().map(|row| self.highlight(row)).collect())
    }

    async fn assemble(
        &self,
        row: AdvertisementDetailRow,
        audience: Audience,
    ) -> AppResult<AdvertisementDetail> {
        let image_keys = self.catalog_repo.image_keys(row.id).await?;
        let days = self.catalog_repo.days(row.id).await?;
        let state = ModerationState::from_flags(
            row.published,
            row.is_deleted,
            row.admin_comment.as_deref(),
        );
        let moderated = audience != Audience::Public;

        Ok(AdvertisementDetail {
            id: row.id,
            title: row.title,
            description: row.description,
            place: row.place,
            views: row.views,
            video: row.video.as_deref().map(|key| self.storage.public_url(key)),
            hour_price: row.hour_price,
            day_price: row.day_price,
            week_price: row.week_price,
            month_price: row.month_price,
            category_name: row.category_name,
            image_urls: image_keys
                .iter()
                .map(|key| self.storage.public_url(key))
                .collect(),
            days,
            created_at: row.created_at,
            published: moderated.then_some(row.published),
            admin_comment: if moderated { row.admin_comment } else { None },
            state: moderated.then_some(state),
            user_id: (audience == Audience::Admin).then_some(row.user_id),
            phone_number: (audience == Audience::Admin).then_some(row.phone_number),
        })
    }

    fn url(&self, key: Option<String>) -> Option<String> {
        key.map(|key| self.storage.public_url(&key))
    }

    fn summary(&self, row: PublishedListingRow) -> ListingSummary {
        ListingSummary {
            id: row.id,
            title: row.title,
            description: row.description,
            place: row.place,
            hour_price: row.hour_price,
            day_price: row.day_price,
            week_price: row.week_price,
            month_price: row.month_price,
            category_name: row.category_name,
            image: self.url(row.cover_image),
        }
    }

    fn owner_listing(&self, row: OwnerListingRow) -> OwnerListing {
        OwnerListing {
            id: row.id,
            title: row.title,
            admin_comment: row.admin_comment,
            views: row.views,
            published: row.published,
            image: self.url(row.cover_image),
        }
    }

    fn highlight(&self, row: HighlightRow) -> HighlightListing {
        HighlightListing {
            id: row.id,
            title: row.title,
            place: row.place,
            views: row.views,
            image: self.url(row.cover_image),
            created_at: row.created_at,
        }
    }
}

fn admin_listing(row: AdminListingRow) -> AdminListing {
    AdminListing {
        state: ModerationState::from_flags(
            row.published,
            row.is_deleted,
            row.admin_comment.as_deref(),
        ),
        id: row.id,
        title: row.title,
        phone_number: row.phone_number,
        published: row.published,
        is_deleted: row.is_deleted,
        admin_comment: row.admin_comment,
        created_at: row.created_at,
    }
}
