//! Price tier value object.

use serde::{Deserialize, Serialize};

/// The four optional rental prices of a listing.
///
/// A tier counts as set only when it is present and non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTiers {
    /// Price per hour.
    pub hour: Option<f64>,
    /// Price per day.
    pub day: Option<f64>,
    /// Price per week.
    pub week: Option<f64>,
    /// Price per month.
    pub month: Option<f64>,
}

impl PriceTiers {
    /// All tiers in hour, day, week, month order.
    pub fn as_array(&self) -> [Option<f64>; 4] {
        [self.hour, self.day, self.week, self.month]
    }

    /// Returns `true` if at least one tier is present and non-zero.
    pub fn any_set(&self) -> bool {
        self.as_array().into_iter().any(is_set)
    }

    /// Returns `true` if the week tier is present and non-zero.
    pub fn has_week(&self) -> bool {
        is_set(self.week)
    }

    /// Returns `true` if the month tier is present and non-zero.
    pub fn has_month(&self) -> bool {
        is_set(self.month)
    }
}

fn is_set(price: Option<f64>) -> bool {
    matches!(price, Some(p) if p != 0.0)
}
