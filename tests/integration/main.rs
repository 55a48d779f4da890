//! Integration tests driving the HTTP router against a live PostgreSQL.
//!
//! Set `DATABASE_URL` to run them; without it every test returns early.

mod helpers;

mod advertisement_test;
mod catalog_test;
mod category_test;
mod moderation_test;
