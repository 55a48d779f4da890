//! Advertisement image rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rental_core::types::AdvertisementId;

/// One stored image of an advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdvertisementImage {
    /// Serial identifier; the lowest one is the listing's cover image.
    pub id: i64,
    /// Owning advertisement.
    pub advertisement_id: AdvertisementId,
    /// Storage key of the image blob.
    pub key: String,
}
