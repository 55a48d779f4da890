//! Repository implementations for all RentBoard entities.

pub mod advertisement;
pub mod catalog;
pub mod category;
pub mod user;

pub use advertisement::AdvertisementRepository;
pub use catalog::CatalogRepository;
pub use category::CategoryRepository;
pub use user::UserRepository;
