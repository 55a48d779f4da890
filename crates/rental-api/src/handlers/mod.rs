//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod advertisement;
pub mod health;
pub mod my;
pub mod payment;
