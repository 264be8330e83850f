mod offer;
mod page;
mod period;
mod price;
mod validation;

pub use offer::{
    InvalidOfferId, MAX_DESCRIPTION_LENGTH, OfferData, OfferId, OfferRecord, OfferStatus,
};
pub use page::{Direction, Page, PageMetadata, PageRequest, Sort, SortProperty};
pub use period::{Period, PeriodError};
pub use price::{Price, parse_currency};
pub use validation::ValidationError;

// Re-exported so downstream crates agree on the exact types used in `Price`
pub use iso_currency::Currency;
pub use rust_decimal::Decimal;
