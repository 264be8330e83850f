//! Storage representation of instants.
//!
//! SQLite has no native timestamp type, so instants are stored as UTC text.
//! Normalizing to UTC before storing keeps the text ordering consistent with
//! chronological ordering, which sorting by creation time relies on.

use std::fmt::Display;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339};

/// A UTC timestamp with subsecond precision, as stored in the database.
///
/// # Examples
///
/// ```
/// # use offers_sqlite::types::DateTime;
/// # use time::OffsetDateTime;
/// let now = OffsetDateTime::now_utc();
/// let stored = DateTime::from(now);
/// assert_eq!(OffsetDateTime::from(stored), now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct DateTime(PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = OffsetDateTime::from(*self);
        match value.format(&Rfc3339) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{value}"),
        }
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        Self(PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}
