//! Availability calendar rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rental_core::types::AdvertisementId;

/// A single day on which the equipment can be rented.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalendarEntry {
    /// Serial identifier.
    pub id: i64,
    /// Owning advertisement.
    pub advertisement_id: AdvertisementId,
    /// The available day, unique per advertisement.
    pub day: NaiveDate,
}
