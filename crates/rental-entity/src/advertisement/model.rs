//! Advertisement entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rental_core::types::{AdvertisementId, UserId};

use super::pricing::PriceTiers;
use super::state::ModerationState;

/// A rentable-equipment listing as stored in `advertisements`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Advertisement {
    /// Unique identifier, generated on creation.
    pub id: AdvertisementId,
    /// Title, at most 250 characters.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Where the equipment can be picked up.
    pub place: String,
    /// Number of public detail reads.
    pub views: i64,
    /// Storage key of the optional video.
    pub video: Option<String>,
    /// Price per hour.
    pub hour_price: Option<f64>,
    /// Price per day.
    pub day_price: Option<f64>,
    /// Price per week.
    pub week_price: Option<f64>,
    /// Price per month.
    pub month_price: Option<f64>,
    /// Visible in the public catalog.
    pub published: bool,
    /// Soft-deleted by the owner.
    pub is_deleted: bool,
    /// Moderator feedback; set means the owner may edit.
    pub admin_comment: Option<String>,
    /// Owning user.
    pub user_id: UserId,
    /// Category; nulled if the category is removed.
    pub category_id: Option<i32>,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

impl Advertisement {
    /// Returns the four price tiers.
    pub fn prices(&self) -> PriceTiers {
        PriceTiers {
            hour: self.hour_price,
            day: self.day_price,
            week: self.week_price,
            month: self.month_price,
        }
    }

    /// Returns the moderation state derived from the stored flags.
    pub fn state(&self) -> ModerationState {
        ModerationState::from_flags(self.published, self.is_deleted, self.admin_comment.as_deref())
    }

    /// Owners may resubmit a listing while it carries a moderator comment,
    /// whether or not it was published again since.
    pub fn awaits_revision(&self) -> bool {
        !self.is_deleted
            && self
                .admin_comment
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty())
    }

    /// Check whether `user_id` owns this listing.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
