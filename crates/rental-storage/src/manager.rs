//! Storage manager that dispatches to the configured blob provider.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use rental_core::config::storage::StorageConfig;
use rental_core::error::AppError;
use rental_core::result::AppResult;
use rental_core::traits::storage::StorageProvider;

/// Central handle to the blob store used for advertisement media.
#[derive(Debug, Clone)]
pub struct StorageManager {
    inner: Arc<dyn StorageProvider>,
}

impl StorageManager {
    /// Create the provider named in configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn StorageProvider> = match config.provider.as_str() {
            #[cfg(feature = "local")]
            "local" => {
                info!(root = %config.local.root_path, "Initializing local storage provider");
                Arc::new(crate::providers::LocalStorageProvider::new(&config.local.root_path).await?)
            }
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: local, s3"
                )));
            }
        };
        Ok(Self { inner })
    }

    /// Wrap an already constructed provider.
    pub fn from_provider(provider: Arc<dyn StorageProvider>) -> Self {
        Self { inner: provider }
    }

    /// Name of the active provider.
    pub fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    /// Store one object.
    pub async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AppResult<()> {
        self.inner.put(key, content_type, data).await
    }

    /// Delete every key, logging failures instead of returning them.
    /// Returns how many deletions succeeded.
    pub async fn delete_best_effort<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut deleted = 0;
        for key in keys {
            let key = key.as_ref();
            match self.inner.delete(key).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!(key, error = %e, "Failed to delete blob"),
            }
        }
        deleted
    }
}
