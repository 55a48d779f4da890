//! # rental-core
//!
//! Core crate for RentBoard. Contains traits, configuration schemas,
//! typed identifiers, pagination types, and the unified error system
//! including the [`DomainError`] taxonomy of named business failures.
//!
//! This crate has **no** internal dependencies on other RentBoard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, DomainError, ErrorKind};
pub use result::AppResult;
