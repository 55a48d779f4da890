//! Category taxonomy entities.

pub mod model;

pub use model::{Category, CategoryWithParent};
