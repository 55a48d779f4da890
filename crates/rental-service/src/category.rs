//! Category administration and lookup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use rental_core::error::{AppError, DomainError};
use rental_core::result::AppResult;
use rental_core::types::pagination::{PageRequest, PageResponse};
use rental_database::repositories::category::{CategoryRecord, CategoryRepository};
use rental_entity::category::CategoryWithParent;

use crate::context::RequestContext;

/// Fields of a category as submitted by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    /// Name of an existing category to nest under.
    pub parent_category_name: Option<String>,
}

/// Resolves category names and manages the category tree.
#[derive(Debug, Clone)]
pub struct CategoryService {
    repo: Arc<CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(repo: Arc<CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Create a category, optionally nested under a named parent.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CategoryInput,
    ) -> AppResult<CategoryWithParent> {
        ctx.require_admin()?;
        let parent_id = self.parent_id(input.parent_category_name.as_deref()).await?;

        let created = self
            .repo
            .create(&CategoryRecord {
                name: input.name,
                slug: input.slug,
                parent_id,
            })
            .await?;

        info!(category = %created.name, slug = %created.slug, "Category created");
        Ok(CategoryWithParent {
            name: created.name,
            slug: created.slug,
            parent_name: input.parent_category_name,
        })
    }

    /// List categories with their parent names.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<CategoryWithParent>> {
        ctx.require_admin()?;
        self.repo.list_with_parent(page).await
    }

    /// Names of categories containing `fragment`, case-insensitively.
    pub async fn search(&self, ctx: &RequestContext, fragment: &str) -> AppResult<Vec<String>> {
        ctx.require_admin()?;
        self.repo.search_by_name(fragment.trim()).await
    }

    /// Fetch one category by slug.
    pub async fn get(&self, ctx: &RequestContext, slug: &str) -> AppResult<CategoryWithParent> {
        ctx.require_admin()?;
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound.into())
    }

    /// Replace name, slug and parent of the category with the given slug.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        slug: &str,
        input: CategoryInput,
    ) -> AppResult<CategoryWithParent> {
        ctx.require_admin()?;
        let parent_id = self.parent_id(input.parent_category_name.as_deref()).await?;

        if let Some(parent_id) = parent_id {
            let current = self.repo.find_row_by_slug(slug).await?;
            if current.is_some_and(|c| c.id == parent_id) {
                return Err(AppError::validation("A category cannot be its own parent"));
            }
        }

        let updated = self
            .repo
            .update_by_slug(
                slug,
                &CategoryRecord {
                    name: input.name,
                    slug: input.slug,
                    parent_id,
                },
            )
            .await?
            .ok_or(DomainError::CategoryNotFound)?;

        info!(previous_slug = %slug, slug = %updated.slug, "Category updated");
        Ok(CategoryWithParent {
            name: updated.name,
            slug: updated.slug,
            parent_name: input.parent_category_name,
        })
    }

    /// Delete the category with the given slug.
    pub async fn delete(&self, ctx: &RequestContext, slug: &str) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.repo.delete_by_slug(slug).await? {
            return Err(DomainError::CategoryNotFound.into());
        }
        info!(slug, "Category deleted");
        Ok(())
    }

    async fn parent_id(&self, parent_name: Option<&str>) -> AppResult<Option<i32>> {
        match parent_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                let parent = self
                    .repo
                    .find_by_name(name)
                    .await?
                    .ok_or(DomainError::InvalidParentCategoryName)?;
                Ok(Some(parent.id))
            }
            None => Ok(None),
        }
    }
}
