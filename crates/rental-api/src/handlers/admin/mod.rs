//! Admin handlers. Every route here requires the admin role.

pub mod advertisements;
pub mod categories;
pub mod users;
