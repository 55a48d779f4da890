//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A node of the category tree. Names and slugs are unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Serial identifier.
    pub id: i32,
    /// Display name, unique across the tree.
    pub name: String,
    /// URL slug used by the admin endpoints.
    pub slug: String,
    /// Parent category, if any.
    pub parent_id: Option<i32>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Category projection joined with its parent's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithParent {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Parent display name.
    pub parent_name: Option<String>,
}
