//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod listing_form;
pub mod pagination;

pub use auth::AuthUser;
pub use json::JsonBody;
pub use listing_form::ListingForm;
pub use pagination::PaginationParams;
