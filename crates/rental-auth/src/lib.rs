//! # rental-auth
//!
//! Caller identity for RentBoard. Accounts and sign-in are handled by a
//! separate service; this crate only verifies the HS256 bearer tokens it
//! issues and turns them into [`Claims`]. The encoder exists for operator
//! tooling and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
