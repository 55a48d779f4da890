//! # rental-service
//!
//! Business logic for RentBoard. Each service orchestrates repositories,
//! the cache, and blob storage to implement one part of the advertisement
//! lifecycle: validated submission, catalog reads, moderation, phone-number
//! reveals, category administration and the subscription fee.
//!
//! Services follow constructor injection. All dependencies are provided
//! at construction time via `Arc` references.

pub mod advertisement;
pub mod catalog;
pub mod category;
pub mod context;
pub mod media;
pub mod moderation;
pub mod payment;
pub mod phone;
pub mod pricing;

pub use advertisement::AdvertisementService;
pub use catalog::CatalogService;
pub use category::CategoryService;
pub use context::RequestContext;
pub use media::MediaValidator;
pub use moderation::ModerationService;
pub use payment::PaymentService;
pub use phone::PhoneRevealService;
