//! User repository implementation.

use sqlx::{PgConnection, PgPool};

use rental_core::error::{AppError, DomainError, ErrorKind};
use rental_core::result::AppResult;
use rental_core::types::UserId;
use rental_entity::user::{User, UserRole};

/// Data required to insert a user row.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub phone_number: String,
    pub role: UserRole,
    pub is_active: bool,
    pub has_subscription_fee: bool,
}

/// Repository for the user flags the advertisement engine reads and flips.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Insert a user. Account provisioning lives outside this service; this
    /// is used by seeding and tests.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, phone_number, role, is_active, has_subscription_fee) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.phone_number)
        .bind(data.role)
        .bind(data.is_active)
        .bind(data.has_subscription_fee)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_phone_number_key") =>
            {
                AppError::conflict(format!(
                    "Phone number '{}' is already registered",
                    data.phone_number
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Set the banned flag. Returns `false` if the user does not exist.
    pub async fn set_banned(&self, id: UserId, banned: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET is_banned = $2 WHERE id = $1")
            .bind(id)
            .bind(banned)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update ban flag", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the subscription fee as paid. Returns `false` when it was already
    /// paid or the user does not exist.
    pub async fn mark_subscription_paid(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET has_subscription_fee = TRUE \
             WHERE id = $1 AND NOT has_subscription_fee",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record subscription fee", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Consume the subscription fee inside an open transaction.
    ///
    /// The flag is only flipped while it is still set, so of several
    /// concurrent creates at most one consumes a single payment; the rest
    /// fail with [`DomainError::PaymentRequired`].
    pub(crate) async fn consume_subscription_fee(
        conn: &mut PgConnection,
        id: UserId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET has_subscription_fee = FALSE \
             WHERE id = $1 AND has_subscription_fee",
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume subscription fee", e)
        })?;
        if result.rows_affected() == 0 {
            return Err(DomainError::PaymentRequired.into());
        }
        Ok(())
    }
}
