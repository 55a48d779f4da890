//! Public catalog filters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rental_core::error::{AppError, DomainError};

/// Inclusive price bounds parsed from a `"min,max"` query value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl FromStr for PriceRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once(',')
            .ok_or(DomainError::InvalidPriceRange)?;
        let min: f64 = min
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidPriceRange)?;
        let max: f64 = max
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidPriceRange)?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DomainError::InvalidPriceRange.into());
        }
        Ok(Self { min, max })
    }
}

/// Optional, independently composable catalog filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the title or the description.
    pub text: Option<String>,
    /// Case-insensitive substring of the place.
    pub place: Option<String>,
    pub hour_price: Option<PriceRange>,
    pub day_price: Option<PriceRange>,
    pub week_price: Option<PriceRange>,
    pub month_price: Option<PriceRange>,
    /// Category name; also matches direct children of that category.
    pub category_name: Option<String>,
}

impl CatalogFilter {
    /// Price ranges paired with their column names.
    pub fn price_ranges(&self) -> [(&'static str, Option<PriceRange>); 4] {
        [
            ("hour_price", self.hour_price),
            ("day_price", self.day_price),
            ("week_price", self.week_price),
            ("month_price", self.month_price),
        ]
    }
}
