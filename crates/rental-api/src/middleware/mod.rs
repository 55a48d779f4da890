//! Axum middleware and layers.

pub mod cors;
pub mod rbac;
pub mod validation;
