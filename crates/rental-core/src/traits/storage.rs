//! Blob storage trait for pluggable storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends keyed by flat object names.
///
/// Implementations exist for the local filesystem and S3-compatible
/// object stores in `rental-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store bytes under the given key, replacing any existing object.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object stored under the key. Missing objects are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
