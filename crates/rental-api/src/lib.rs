//! # rental-api
//!
//! HTTP API layer for RentBoard built on Axum.
//!
//! Provides the REST endpoints for listings, the catalog, moderation,
//! categories and payments, together with the bearer-token extractor,
//! request DTOs and the mapping from [`rental_core::AppError`] to JSON
//! error responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use state::AppState;
