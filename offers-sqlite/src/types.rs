//! Type definitions for the SQLite implementation.
//!
//! This module contains the storage representation of timestamps and the
//! row type offers are read into, along with the conversion from a raw row
//! back into a validated [`OfferRecord`].

use offers_core::models::{
    Decimal, InvalidOfferId, OfferData, OfferId, OfferRecord, PeriodError, Price,
    ValidationError, parse_currency,
};
use thiserror::Error;

mod datetime;
pub use datetime::DateTime;

/// A stored row that no longer satisfies the offer invariants.
///
/// This only happens if the database was modified behind the repository's back.
#[derive(Debug, Error)]
pub enum CorruptRow {
    /// The id column is not a positive integer
    #[error("invalid offer id: {0}")]
    Id(#[from] InvalidOfferId),

    /// The currency column is not a known currency code
    #[error("unknown currency code '{0}'")]
    Currency(String),

    /// The amount column is not a decimal number
    #[error("invalid amount: {0}")]
    Amount(#[from] rust_decimal::Error),

    /// The duration column is not a period
    #[error(transparent)]
    Duration(#[from] PeriodError),

    /// The remaining fields fail validation
    #[error(transparent)]
    Data(#[from] ValidationError),
}

#[derive(sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub id: i64,
    pub created_at: DateTime,
    pub description: String,
    pub currency: String,
    pub amount: String,
    pub duration: String,
    pub cancelled: bool,
}

impl TryFrom<OfferRow> for OfferRecord {
    type Error = CorruptRow;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        let currency = parse_currency(&row.currency).ok_or(CorruptRow::Currency(row.currency))?;
        let value: Decimal = row.amount.parse()?;
        let duration = row.duration.parse()?;

        Ok(Self {
            id: OfferId::new(row.id)?,
            created_at: row.created_at.into(),
            data: OfferData::new(
                row.description,
                Price::new(currency, value),
                duration,
                row.cancelled,
            )?,
        })
    }
}

impl OfferRow {
    /// Convert into a record, surfacing invariant violations as decode errors.
    pub(crate) fn into_record(self) -> Result<OfferRecord, sqlx::Error> {
        OfferRecord::try_from(self).map_err(|err| sqlx::Error::Decode(Box::new(err)))
    }
}
