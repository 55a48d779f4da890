//! Pool setup for the listing database.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use rental_core::config::DatabaseConfig;
use rental_core::error::{AppError, ErrorKind};
use rental_core::result::AppResult;

/// Name reported in `pg_stat_activity` for server connections.
const APPLICATION_NAME: &str = "rentboard";

/// Connection pool shared by every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database URL {}: {e}", redact(&config.url)),
                    e,
                )
            })?
            .application_name(APPLICATION_NAME);

        info!(
            url = %redact(&config.url),
            max = config.max_connections,
            min = config.min_connections,
            "Opening listing database pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Listing database unreachable: {e}"),
                    e,
                )
            })?;

        info!(size = pool.size(), "Listing database pool ready");
        Ok(Self { pool })
    }

    /// Hand the pool to the repositories.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}

/// Replace the password in a connection URL before it is logged.
fn redact(url: &str) -> String {
    let Some(at) = url.find('@') else {
        return url.to_string();
    };
    let credentials_start = url.find("://").map_or(0, |p| p + 3);
    match url[..at].rfind(':') {
        Some(colon) if colon > credentials_start => {
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        _ => url.to_string(),
    }
}
