use super::PeriodError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Caller-supplied data that cannot be accepted.
///
/// These are always recoverable by the caller and never reach the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The description is empty
    #[error("description must not be empty")]
    EmptyDescription,

    /// The description exceeds the maximum length
    #[error("description must be at most {max} characters, got {len}")]
    DescriptionTooLong {
        /// The length of the rejected description, in characters
        len: usize,
        /// The maximum allowed length
        max: usize,
    },

    /// The currency code is not a known ISO-4217 code
    #[error("'{0}' is not a valid textual representation of an ISO-4217 currency code")]
    UnknownCurrency(String),

    /// A caller-chosen offer id is above [`OfferId::MAX_CHOSEN`](super::OfferId::MAX_CHOSEN)
    #[error("offer id {id} is larger than the largest id that can be chosen ({max})")]
    ChosenIdTooLarge {
        /// The rejected id
        id: i64,
        /// The largest id a caller may choose
        max: i64,
    },

    /// The price value is below zero
    #[error("price value must be greater than or equal to 0, got {0}")]
    NegativePrice(Decimal),

    /// The duration does not parse as a period
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// A sort order names a property offers cannot be sorted by
    #[error("cannot sort offers by '{0}'")]
    UnknownSortProperty(String),

    /// A sort order has a direction other than `asc` or `desc`
    #[error("unknown sort direction '{0}'")]
    UnknownSortDirection(String),
}
