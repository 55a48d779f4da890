//! Catalog paging configuration.

use serde::{Deserialize, Serialize};

/// Paging defaults for catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Page size used when `per-page` is not supplied.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for `per-page`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Number of listings returned by the most-viewed and recent lists.
    #[serde(default = "default_highlight_limit")]
    pub highlight_limit: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            highlight_limit: default_highlight_limit(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_highlight_limit() -> i64 {
    10
}
