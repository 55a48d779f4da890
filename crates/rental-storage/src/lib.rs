//! # rental-storage
//!
//! Blob storage for advertisement media. Objects are addressed by flat
//! keys (`{uuid}{.ext}`) and live either on the local filesystem or in an
//! S3-compatible bucket.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
