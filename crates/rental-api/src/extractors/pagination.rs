//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use rental_core::config::CatalogConfig;
use rental_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page.
    #[serde(rename = "per-page")]
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest` using the configured defaults and bound.
    pub fn into_page_request(self, config: &CatalogConfig) -> PageRequest {
        let per_page = self
            .per_page
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1));
        PageRequest::new(self.page.unwrap_or(1), per_page)
    }
}
