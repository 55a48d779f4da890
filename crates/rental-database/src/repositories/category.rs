//! Category repository implementation.

use sqlx::{PgConnection, PgPool};

use rental_core::error::{AppError, DomainError, ErrorKind};
use rental_core::result::AppResult;
use rental_core::types::pagination::{PageRequest, PageResponse};
use rental_entity::category::{Category, CategoryWithParent};

/// Fields written when creating or updating a category.
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
}

const WITH_PARENT: &str = "SELECT c.name, c.slug, p.name AS parent_name \
     FROM categories c LEFT JOIN categories p ON p.id = c.parent_id";

/// Repository for the category taxonomy.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a category by its exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category by name", e)
            })
    }

    /// Find the category row with the given slug.
    pub async fn find_row_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category by slug", e)
            })
    }

    /// Resolve a category name to its id inside an open transaction.
    pub(crate) async fn resolve_id(conn: &mut PgConnection, name: &str) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve category", e))?
            .ok_or_else(|| DomainError::UnknownCategory.into())
    }

    /// Insert a new category.
    pub async fn create(&self, record: &CategoryRecord) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug, parent_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create category"))
    }

    /// Case-insensitive substring search on names.
    pub async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM categories WHERE name ILIKE '%' || $1 || '%' ORDER BY name",
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search categories", e))
    }

    /// List all categories with their parent's name.
    pub async fn list_with_parent(
        &self,
        page: &PageRequest,
    ) -> AppResult<PageResponse<CategoryWithParent>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count categories", e)
            })?;

        let items = sqlx::query_as::<_, CategoryWithParent>(&format!(
            "{WITH_PARENT} ORDER BY c.name LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))?;

        Ok(PageResponse::new(total, items))
    }

    /// Find a category by slug, joined with its parent's name.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<CategoryWithParent>> {
        sqlx::query_as::<_, CategoryWithParent>(&format!("{WITH_PARENT} WHERE c.slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category by slug", e)
            })
    }

    /// Replace name, slug and parent of the category with the given slug.
    /// Returns `None` if no category has that slug.
    pub async fn update_by_slug(
        &self,
        slug: &str,
        record: &CategoryRecord,
    ) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, slug = $3, parent_id = $4 \
             WHERE slug = $1 RETURNING *",
        )
        .bind(slug)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update category"))
    }

    /// Delete the category with the given slug. Returns `false` if none matched.
    ///
    /// Fails with [`DomainError::CategoryInUse`] while other categories name
    /// it as their parent. Advertisements in the category keep existing
    /// with a null category.
    pub async fn delete_by_slug(&self, slug: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to delete category"))?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if matches!(
                db_err.constraint(),
                Some("categories_name_key") | Some("categories_slug_key")
            ) =>
        {
            AppError::domain_with_source(DomainError::DuplicateCategoryName, e)
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("categories_parent_id_fkey") =>
        {
            AppError::domain_with_source(DomainError::CategoryInUse, e)
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}
