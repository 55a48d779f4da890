//! Embedded schema for users, categories and advertisements.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use rental_core::error::{AppError, ErrorKind};
use rental_core::result::AppResult;

/// Files under `migrations/`, compiled into the binary.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to the newest embedded version.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let latest = latest_version();
    info!(
        embedded = MIGRATOR.iter().count(),
        latest, "Applying listing schema"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!(latest, "Listing schema is current");
    Ok(())
}

fn latest_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default()
}
