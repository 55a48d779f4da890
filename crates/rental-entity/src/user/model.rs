//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rental_core::types::UserId;

use super::role::UserRole;

/// A marketplace member. Accounts are created elsewhere; the advertisement
/// engine reads and flips the moderation and billing flags.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Phone number used as the login identity.
    pub phone_number: String,
    /// Caller role.
    pub role: UserRole,
    /// Whether the account has been activated.
    pub is_active: bool,
    /// Banned users' listings are hidden from the public catalog.
    pub is_banned: bool,
    /// Set by a payment, cleared when the next advertisement is created.
    pub has_subscription_fee: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
