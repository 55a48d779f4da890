//! Advertisement domain entities: the listing row, its media and calendar
//! rows, derived moderation state, and the read projections used by the
//! catalog queries.

pub mod calendar;
pub mod filter;
pub mod media;
pub mod model;
pub mod pricing;
pub mod state;
pub mod views;

pub use calendar::CalendarEntry;
pub use filter::{CatalogFilter, PriceRange};
pub use media::AdvertisementImage;
pub use model::Advertisement;
pub use pricing::PriceTiers;
pub use state::ModerationState;
