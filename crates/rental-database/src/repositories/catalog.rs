//! Catalog read queries.
//!
//! Public reads share one visibility predicate: the listing is published,
//! not deleted, and its owner is not banned. Optional filters are appended
//! with [`QueryBuilder`] so that every user-supplied value is bound.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use rental_core::error::{AppError, ErrorKind};
use rental_core::result::AppResult;
use rental_core::types::pagination::{PageRequest, PageResponse};
use rental_core::types::{AdvertisementId, UserId};
use rental_entity::advertisement::views::{
    AdminListingRow, AdvertisementDetailRow, HighlightRow, OwnerListingRow, PublishedListingRow,
};
use rental_entity::advertisement::CatalogFilter;

const VISIBLE: &str = "a.published AND NOT a.is_deleted AND NOT u.is_banned";

const COVER_IMAGE: &str = "(SELECT i.key FROM advertisement_images i \
     WHERE i.advertisement_id = a.id ORDER BY i.id LIMIT 1) AS cover_image";

const DETAIL_SELECT: &str = "SELECT a.id, a.title, a.description, a.place, a.views, a.video, \
     a.hour_price, a.day_price, a.week_price, a.month_price, a.published, a.is_deleted, \
     a.admin_comment, a.created_at, a.user_id, c.name AS category_name, u.phone_number \
     FROM advertisements a \
     JOIN users u ON u.id = a.user_id \
     LEFT JOIN categories c ON c.id = a.category_id";

/// Highlight list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    MostViewed,
    Recent,
}

impl Highlight {
    fn order_by(self) -> &'static str {
        match self {
            Self::MostViewed => "a.views DESC, a.created_at DESC",
            Self::Recent => "a.created_at DESC",
        }
    }
}

/// Repository for catalog, owner and admin read projections.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered, paginated public catalog, newest first.
    pub async fn published(
        &self,
        filter: &CatalogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PublishedListingRow>> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM advertisements a JOIN users u ON u.id = a.user_id WHERE ",
        );
        count.push(VISIBLE);
        push_catalog_filters(&mut count, filter);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count catalog", e))?;

        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT a.id, a.title, a.description, a.place, \
             a.hour_price, a.day_price, a.week_price, a.month_price, \
             c.name AS category_name, ",
        );
        query
            .push(COVER_IMAGE)
            .push(
                " FROM advertisements a \
                 JOIN users u ON u.id = a.user_id \
                 LEFT JOIN categories c ON c.id = a.category_id WHERE ",
            )
            .push(VISIBLE);
        push_catalog_filters(&mut query, filter);
        query
            .push(" ORDER BY a.created_at DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        debug!(sql = query.sql(), "Running catalog query");

        let items = query
            .build_query_as::<PublishedListingRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load catalog", e))?;

        Ok(PageResponse::new(total, items))
    }

    /// The caller's non-deleted listings in any publication state.
    pub async fn owner_listings(&self, user_id: UserId) -> AppResult<Vec<OwnerListingRow>> {
        sqlx::query_as::<_, OwnerListingRow>(&format!(
            "SELECT a.id, a.title, a.admin_comment, a.views, a.published, {COVER_IMAGE} \
             FROM advertisements a \
             WHERE a.user_id = $1 AND NOT a.is_deleted \
             ORDER BY a.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list own listings", e))
    }

    /// Top published listings by the given ordering.
    pub async fn highlights(&self, kind: Highlight, limit: i64) -> AppResult<Vec<HighlightRow>> {
        sqlx::query_as::<_, HighlightRow>(&format!(
            "SELECT a.id, a.title, a.place, a.views, {COVER_IMAGE}, a.created_at \
             FROM advertisements a JOIN users u ON u.id = a.user_id \
             WHERE {VISIBLE} ORDER BY {} LIMIT $1",
            kind.order_by()
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load highlights", e))
    }

    /// Paginated list of every advertisement, newest first.
    pub async fn admin_listings(
        &self,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AdminListingRow>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advertisements")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count advertisements", e)
            })?;

        let items = sqlx::query_as::<_, AdminListingRow>(
            "SELECT a.id, a.title, u.phone_number, a.published, a.is_deleted, \
             a.admin_comment, a.created_at \
             FROM advertisements a JOIN users u ON u.id = a.user_id \
             ORDER BY a.created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list advertisements", e)
        })?;

        Ok(PageResponse::new(total, items))
    }

    /// Detail of a publicly visible listing.
    pub async fn published_detail(
        &self,
        id: AdvertisementId,
    ) -> AppResult<Option<AdvertisementDetailRow>> {
        self.detail(&format!("WHERE a.id = $1 AND {VISIBLE}"), id, None)
            .await
    }

    /// Detail of a non-deleted listing owned by `user_id`.
    pub async fn owner_detail(
        &self,
        id: AdvertisementId,
        user_id: UserId,
    ) -> AppResult<Option<AdvertisementDetailRow>> {
        self.detail(
            "WHERE a.id = $1 AND a.user_id = $2 AND NOT a.is_deleted",
            id,
            Some(user_id),
        )
        .await
    }

    /// Detail of any listing regardless of its state.
    pub async fn admin_detail(
        &self,
        id: AdvertisementId,
    ) -> AppResult<Option<AdvertisementDetailRow>> {
        self.detail("WHERE a.id = $1", id, None).await
    }

    /// Owner phone number of a publicly visible listing.
    pub async fn visible_phone_number(&self, id: AdvertisementId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(&format!(
            "SELECT u.phone_number FROM advertisements a JOIN users u ON u.id = a.user_id \
             WHERE a.id = $1 AND {VISIBLE}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load phone number", e))
    }

    /// Image keys of a listing, cover image first.
    pub async fn image_keys(&self, id: AdvertisementId) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT key FROM advertisement_images WHERE advertisement_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load images", e))
    }

    /// Available days of a listing in ascending order.
    pub async fn days(&self, id: AdvertisementId) -> AppResult<Vec<NaiveDate>> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT day FROM calendar_entries WHERE advertisement_id = $1 ORDER BY day",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load calendar", e))
    }

    async fn detail(
        &self,
        predicate: &str,
        id: AdvertisementId,
        owner: Option<UserId>,
    ) -> AppResult<Option<AdvertisementDetailRow>> {
        let sql = format!("{DETAIL_SELECT} {predicate}");
        let mut query = sqlx::query_as::<_, AdvertisementDetailRow>(&sql).bind(id);
        if let Some(owner) = owner {
            query = query.bind(owner);
        }
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load listing", e))
    }
}

/// Append the optional catalog filters, each joined with `AND`.
fn push_catalog_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &CatalogFilter) {
    if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
        let pattern = like_pattern(text);
        query
            .push(" AND (a.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(place) = filter.place.as_deref().filter(|p| !p.is_empty()) {
        query.push(" AND a.place ILIKE ").push_bind(like_pattern(place));
    }

    for (column, range) in filter.price_ranges() {
        if let Some(range) = range {
            query
                .push(" AND a.")
                .push(column)
                .push(" BETWEEN ")
                .push_bind(range.min)
                .push(" AND ")
                .push_bind(range.max);
        }
    }

    if let Some(name) = filter.category_name.as_deref().filter(|n| !n.is_empty()) {
        query
            .push(
                " AND a.category_id IN (SELECT c2.id FROM categories c2 \
                 WHERE c2.name = ",
            )
            .push_bind(name.to_string())
            .push(" OR c2.parent_id = (SELECT c3.id FROM categories c3 WHERE c3.name = ")
            .push_bind(name.to_string())
            .push("))");
    }
}

/// Wrap a user fragment for a substring `ILIKE`, escaping wildcards.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
