//! # rental-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all RentBoard entities, including the
//! transactional advertisement writes and the catalog query builder.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
