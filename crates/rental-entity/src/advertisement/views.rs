//! Read projections returned by the catalog queries.
//!
//! `cover_image` and `video` carry storage keys; the service layer turns
//! them into public URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rental_core::types::{AdvertisementId, UserId};

/// A row of the public catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublishedListingRow {
    pub id: AdvertisementId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub hour_price: Option<f64>,
    pub day_price: Option<f64>,
    pub week_price: Option<f64>,
    pub month_price: Option<f64>,
    pub category_name: Option<String>,
    pub cover_image: Option<String>,
}

/// A row of the caller's own listing list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerListingRow {
    pub id: AdvertisementId,
    pub title: String,
    pub admin_comment: Option<String>,
    pub views: i64,
    pub published: bool,
    pub cover_image: Option<String>,
}

/// A row of the admin listing list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminListingRow {
    pub id: AdvertisementId,
    pub title: String,
    pub phone_number: String,
    pub published: bool,
    pub is_deleted: bool,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row of the most-viewed and recent highlight lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HighlightRow {
    pub id: AdvertisementId,
    pub title: String,
    pub place: String,
    pub views: i64,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Scalar fields of one listing joined with category and owner data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdvertisementDetailRow {
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
    pub published: bool,
    pub is_deleted: bool,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub category_name: Option<String>,
    pub phone_number: String,
}
