//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use rental_core::error::AppError;
use rental_core::types::pagination::PageRequest;
use rental_entity::advertisement::{CatalogFilter, PriceRange};
use rental_service::category::CategoryInput;

use crate::extractors::PaginationParams;

/// Create or update a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "Slug must be 1-100 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,
    pub parent_category_name: Option<String>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            slug: req.slug,
            parent_category_name: req.parent_category_name,
        }
    }
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let ok = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(validator::ValidationError::new("slug")
            .with_message("Slug may only contain lowercase letters, digits, '-' and '_'".into()))
    }
}

/// Admin feedback on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: String,
}

/// `?name=` of the category search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySearchQuery {
    #[serde(default)]
    pub name: String,
}

/// Query string of the public catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub page: Option<u64>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u64>,
    pub text_icontains: Option<String>,
    pub place_icontains: Option<String>,
    pub hour_price_range: Option<String>,
    pub day_price_range: Option<String>,
    pub week_price_range: Option<String>,
    pub month_price_range: Option<String>,
    pub category_name: Option<String>,
}

impl CatalogQuery {
    /// Paging part of the query.
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Parse the filter part. Blank values are ignored.
    pub fn filter(&self) -> Result<CatalogFilter, AppError> {
        Ok(CatalogFilter {
            text: non_blank(&self.text_icontains),
            place: non_blank(&self.place_icontains),
            hour_price: range(&self.hour_price_range)?,
            day_price: range(&self.day_price_range)?,
            week_price: range(&self.week_price_range)?,
            month_price: range(&self.month_price_range)?,
            category_name: non_blank(&self.category_name),
        })
    }

    /// Both parts, with the configured paging bounds.
    pub fn split(
        &self,
        config: &rental_core::config::CatalogConfig,
    ) -> Result<(CatalogFilter, PageRequest), AppError> {
        Ok((self.filter()?, self.pagination().into_page_request(config)))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn range(value: &Option<String>) -> Result<Option<PriceRange>, AppError> {
    non_blank(value).map(|raw| raw.parse()).transpose()
}
