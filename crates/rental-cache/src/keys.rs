//! Cache key builders for all RentBoard cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. The Redis provider adds its
//! configured prefix on top of these.

use rental_core::types::UserId;

/// Phone reveals by one user within the hourly window.
pub fn phone_reveal_hourly(user_id: UserId) -> String {
    format!("phone_reveal:hourly:{user_id}")
}

/// Phone reveals by one user within the daily window.
pub fn phone_reveal_daily(user_id: UserId) -> String {
    format!("phone_reveal:daily:{user_id}")
}
