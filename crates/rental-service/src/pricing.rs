//! Price tier and availability checks.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use rental_core::error::DomainError;
use rental_core::result::AppResult;
use rental_entity::advertisement::PriceTiers;

/// Days a week price needs.
pub const WEEK_MIN_DAYS: usize = 7;
/// Days a month price needs.
pub const MONTH_MIN_DAYS: usize = 30;

/// Check the prices against the availability calendar.
///
/// Repeated days are counted once here; storing them is rejected later by
/// the calendar's unique constraint.
pub fn validate_pricing(prices: &PriceTiers, days: &[NaiveDate]) -> AppResult<()> {
    if prices.as_array().into_iter().flatten().any(|p| p < 0.0) {
        return Err(DomainError::NegativePrice.into());
    }
    if !prices.any_set() {
        return Err(DomainError::NoPriceSet.into());
    }
    if days.is_empty() {
        return Err(DomainError::NoDays.into());
    }

    let distinct = days.iter().collect::<BTreeSet<_>>().len();
    if prices.has_week() && distinct < WEEK_MIN_DAYS {
        return Err(DomainError::InsufficientDaysForWeekRate.into());
    }
    if prices.has_month() && distinct < MONTH_MIN_DAYS {
        return Err(DomainError::InsufficientDaysForMonthRate.into());
    }
    Ok(())
}
