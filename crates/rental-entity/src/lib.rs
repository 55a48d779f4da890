//! # rental-entity
//!
//! Domain entity models for RentBoard. Every struct in this crate
//! represents a database table row, a query projection, or a domain value
//! object. Database entities derive `sqlx::FromRow`.

pub mod advertisement;
pub mod category;
pub mod user;
