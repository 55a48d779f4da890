//! Advertisement repository: transactional multi-table writes and
//! moderation flag updates.
//!
//! Every write that touches more than one table runs inside a single
//! transaction that is committed only when all statements succeeded and
//! rolled back otherwise.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::warn;

use rental_core::error::{AppError, DomainError, ErrorKind};
use rental_core::result::AppResult;
use rental_core::types::{AdvertisementId, UserId};
use rental_entity::advertisement::{Advertisement, PriceTiers};

use super::category::CategoryRepository;
use super::user::UserRepository;

const DUPLICATE_DAY_CONSTRAINT: &str = "calendar_entries_advertisement_day_key";

/// Everything written when an advertisement is created.
#[derive(Debug, Clone)]
pub struct NewAdvertisementRecord {
    pub id: AdvertisementId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub category_name: String,
    pub prices: PriceTiers,
    pub video: Option<String>,
    pub image_keys: Vec<String>,
    pub days: Vec<NaiveDate>,
}

/// How the video column changes on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoChange {
    /// A new video was uploaded under this key.
    Replace(String),
    /// Keep the current video if it matches the caller's retained key,
    /// otherwise clear it.
    Retain(Option<String>),
}

/// Everything written when an owner resubmits an advertisement.
#[derive(Debug, Clone)]
pub struct ReplaceAdvertisementRecord {
    pub id: AdvertisementId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub category_name: String,
    pub prices: PriceTiers,
    pub video: VideoChange,
    pub new_image_keys: Vec<String>,
    pub retained_image_keys: Vec<String>,
    pub days: Vec<NaiveDate>,
}

/// Storage keys that no row references after a replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetachedMedia {
    pub video: Option<String>,
    pub images: Vec<String>,
}

impl DetachedMedia {
    /// All detached keys, video first.
    pub fn into_keys(self) -> Vec<String> {
        self.video.into_iter().chain(self.images).collect()
    }
}

/// Repository for advertisement rows and their image and calendar rows.
#[derive(Debug, Clone)]
pub struct AdvertisementRepository {
    pool: PgPool,
}

impl AdvertisementRepository {
    /// Create a new advertisement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an advertisement row by id, in any state.
    pub async fn find_by_id(&self, id: AdvertisementId) -> AppResult<Option<Advertisement>> {
        sqlx::query_as::<_, Advertisement>("SELECT * FROM advertisements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find advertisement", e)
            })
    }

    /// Storage keys of the advertisement's images, cover image first.
    pub async fn image_keys(&self, id: AdvertisementId) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT key FROM advertisement_images WHERE advertisement_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load image keys", e))
    }

    /// Insert the advertisement with its images and days and consume the
    /// owner's subscription fee, all in one transaction.
    pub async fn create_with_media(&self, record: &NewAdvertisementRecord) -> AppResult<()> {
        let mut tx = self.begin().await?;
        let result = insert_all(&mut tx, record).await;
        finish(tx, result).await
    }

    /// Replace an advertisement that is waiting for revision.
    ///
    /// The row is locked for the duration of the transaction. Image and
    /// calendar rows are deleted and re-inserted, the category re-resolved
    /// and the admin comment cleared. Returns the storage keys that are no
    /// longer referenced.
    pub async fn replace_with_media(
        &self,
        record: &ReplaceAdvertisementRecord,
    ) -> AppResult<DetachedMedia> {
        let mut tx = self.begin().await?;
        let result = replace_all(&mut tx, record).await;
        finish(tx, result).await
    }

    /// Soft-delete a listing owned by `user_id`. Returns `false` when the
    /// listing is missing, not owned by the caller, or already deleted.
    pub async fn soft_delete(&self, id: AdvertisementId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE advertisements SET is_deleted = TRUE \
             WHERE id = $1 AND user_id = $2 AND NOT is_deleted",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete advertisement", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Physically delete an advertisement; images and days cascade.
    /// Returns the storage keys that belonged to it, or `None` if no row matched.
    pub async fn hard_delete(&self, id: AdvertisementId) -> AppResult<Option<DetachedMedia>> {
        let mut tx = self.begin().await?;
        let result = delete_all(&mut tx, id).await;
        finish(tx, result).await
    }

    /// Set the published flag unless the listing is deleted.
    /// Returns the row as it was before the update, or `None` if it is missing.
    pub async fn set_published(
        &self,
        id: AdvertisementId,
        published: bool,
    ) -> AppResult<Option<Advertisement>> {
        let mut tx = self.begin().await?;
        let result = update_unless_deleted(
            &mut tx,
            id,
            sqlx::query("UPDATE advertisements SET published = $2 WHERE id = $1")
                .bind(id)
                .bind(published),
        )
        .await;
        finish(tx, result).await
    }

    /// Store a moderator comment and unpublish in a single update.
    /// Returns the row as it was before the update, or `None` if it is missing.
    pub async fn set_admin_comment(
        &self,
        id: AdvertisementId,
        comment: &str,
    ) -> AppResult<Option<Advertisement>> {
        let mut tx = self.begin().await?;
        let result = update_unless_deleted(
            &mut tx,
            id,
            sqlx::query(
                "UPDATE advertisements SET admin_comment = $2, published = FALSE WHERE id = $1",
            )
            .bind(id)
            .bind(comment),
        )
        .await;
        finish(tx, result).await
    }

    /// Bump the view counter.
    pub async fn increment_views(&self, id: AdvertisementId) -> AppResult<()> {
        sqlx::query("UPDATE advertisements SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment views", e)
            })?;
        Ok(())
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }
}

/// Commit on success, roll back on failure.
async fn finish<T>(tx: Transaction<'static, Postgres>, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}

async fn insert_all(conn: &mut PgConnection, record: &NewAdvertisementRecord) -> AppResult<()> {
    UserRepository::consume_subscription_fee(conn, record.user_id).await?;
    let category_id = CategoryRepository::resolve_id(conn, &record.category_name).await?;

    sqlx::query(
        "INSERT INTO advertisements \
         (id, title, description, place, video, hour_price, day_price, week_price, month_price, \
          user_id, category_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(record.id)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.place)
    .bind(&record.video)
    .bind(record.prices.hour)
    .bind(record.prices.day)
    .bind(record.prices.week)
    .bind(record.prices.month)
    .bind(record.user_id)
    .bind(category_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert advertisement", e))?;

    insert_images(conn, record.id, &record.image_keys).await?;
    insert_days(conn, record.id, &record.days).await
}

async fn replace_all(
    conn: &mut PgConnection,
    record: &ReplaceAdvertisementRecord,
) -> AppResult<DetachedMedia> {
    let current = sqlx::query_as::<_, Advertisement>(
        "SELECT * FROM advertisements WHERE id = $1 AND user_id = $2 AND NOT is_deleted FOR UPDATE",
    )
    .bind(record.id)
    .bind(record.user_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock advertisement", e))?
    .ok_or(DomainError::AdvertisementNotFound)?;

    if !current.awaits_revision() {
        return Err(DomainError::NotEligibleForUpdate.into());
    }

    let previous_images = sqlx::query_scalar::<_, String>(
        "DELETE FROM advertisement_images WHERE advertisement_id = $1 RETURNING key",
    )
    .bind(record.id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear images", e))?;

    sqlx::query("DELETE FROM calendar_entries WHERE advertisement_id = $1")
        .bind(record.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear calendar", e))?;

    let category_id = CategoryRepository::resolve_id(conn, &record.category_name).await?;

    let (video, detached_video) = match &record.video {
        VideoChange::Replace(key) => (Some(key.clone()), current.video.clone()),
        VideoChange::Retain(requested) if requested.is_some() && *requested == current.video => {
            (current.video.clone(), None)
        }
        VideoChange::Retain(_) => (None, current.video.clone()),
    };

    sqlx::query(
        "UPDATE advertisements SET title = $2, description = $3, place = $4, video = $5, \
         hour_price = $6, day_price = $7, week_price = $8, month_price = $9, \
         category_id = $10, admin_comment = NULL \
         WHERE id = $1",
    )
    .bind(record.id)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.place)
    .bind(&video)
    .bind(record.prices.hour)
    .bind(record.prices.day)
    .bind(record.prices.week)
    .bind(record.prices.month)
    .bind(category_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update advertisement", e))?;

    insert_days(conn, record.id, &record.days).await?;

    let owned: HashSet<&str> = previous_images.iter().map(String::as_str).collect();
    let mut retained: Vec<String> = Vec::new();
    for key in &record.retained_image_keys {
        if owned.contains(key.as_str()) && !retained.contains(key) {
            retained.push(key.clone());
        }
    }

    let keys: Vec<String> = retained
        .iter()
        .chain(record.new_image_keys.iter())
        .cloned()
        .collect();
    insert_images(conn, record.id, &keys).await?;

    let images = previous_images
        .into_iter()
        .filter(|key| !retained.contains(key))
        .collect();

    Ok(DetachedMedia {
        video: detached_video,
        images,
    })
}

async fn delete_all(
    conn: &mut PgConnection,
    id: AdvertisementId,
) -> AppResult<Option<DetachedMedia>> {
    let images = sqlx::query_scalar::<_, String>(
        "SELECT key FROM advertisement_images WHERE advertisement_id = $1 ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load image keys", e))?;

    let deleted: Option<Option<String>> =
        sqlx::query_scalar("DELETE FROM advertisements WHERE id = $1 RETURNING video")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete advertisement", e)
            })?;

    Ok(deleted.map(|video| DetachedMedia { video, images }))
}

async fn update_unless_deleted(
    conn: &mut PgConnection,
    id: AdvertisementId,
    update: sqlx::query::Query<'_, Postgres, sqlx::postgres::PgArguments>,
) -> AppResult<Option<Advertisement>> {
    let Some(current) = sqlx::query_as::<_, Advertisement>(
        "SELECT * FROM advertisements WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock advertisement", e))?
    else {
        return Ok(None);
    };

    if !current.state().can_moderate() {
        return Err(DomainError::AdvertisementDeleted.into());
    }

    update.execute(&mut *conn).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to moderate advertisement", e)
    })?;

    Ok(Some(current))
}

async fn insert_images(
    conn: &mut PgConnection,
    id: AdvertisementId,
    keys: &[String],
) -> AppResult<()> {
    for key in keys {
        sqlx::query("INSERT INTO advertisement_images (advertisement_id, key) VALUES ($1, $2)")
            .bind(id)
            .bind(key)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert image", e))?;
    }
    Ok(())
}

async fn insert_days(conn: &mut PgConnection, id: AdvertisementId, days: &[NaiveDate]) -> AppResult<()> {
    for day in days {
        sqlx::query("INSERT INTO calendar_entries (advertisement_id, day) VALUES ($1, $2)")
            .bind(id)
            .bind(day)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(DUPLICATE_DAY_CONSTRAINT) =>
                {
                    AppError::domain_with_source(DomainError::DuplicateCalendarDay, e)
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to insert calendar day", e),
            })?;
    }
    Ok(())
}
