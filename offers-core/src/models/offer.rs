use super::{Period, Price, ValidationError};
use rust_decimal::Decimal;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use time::OffsetDateTime;

/// The maximum length of an offer description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// The store-assigned identifier of an offer.
///
/// Identifiers are positive and strictly increasing in order of assignment;
/// the store never hands out the same identifier twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct OfferId(i64);

/// An offer identifier that is not a positive integer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("offer id must be a positive integer")]
pub struct InvalidOfferId;

impl OfferId {
    /// Wrap a raw identifier, which must be positive.
    pub const fn new(value: i64) -> Result<Self, InvalidOfferId> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(InvalidOfferId)
        }
    }

    /// The largest id a caller may pick when replacing an offer that does not
    /// exist yet. Ids above it are left for the store to assign.
    pub const MAX_CHOSEN: Self = Self((1 << 53) - 1);

    /// The raw identifier
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Accept this id as one chosen by a caller, i.e. at most [`Self::MAX_CHOSEN`].
    pub const fn chosen(self) -> Result<Self, ValidationError> {
        if self.0 <= Self::MAX_CHOSEN.0 {
            Ok(self)
        } else {
            Err(ValidationError::ChosenIdTooLarge {
                id: self.0,
                max: Self::MAX_CHOSEN.0,
            })
        }
    }
}

impl Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OfferId {
    type Err = InvalidOfferId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.parse().map_err(|_| InvalidOfferId)?)
    }
}

impl TryFrom<i64> for OfferId {
    type Error = InvalidOfferId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OfferId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::new(i64::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// The caller-controlled part of an offer.
///
/// An `OfferData` can only be obtained through [`OfferData::new`] (or by
/// deserializing, which goes through the same checks), so holding one means
/// the description, price and duration have already been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "OfferDataDto", into = "OfferDataDto")
)]
pub struct OfferData {
    description: String,
    price: Price,
    duration: Period,
    cancelled: bool,
}

impl OfferData {
    /// Validate and assemble offer data.
    pub fn new(
        description: impl Into<String>,
        price: Price,
        duration: Period,
        cancelled: bool,
    ) -> Result<Self, ValidationError> {
        let description = description.into();

        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }

        if price.value < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(price.value));
        }

        Ok(Self {
            description,
            price,
            duration,
            cancelled,
        })
    }

    /// Free text describing the offer
    pub fn description(&self) -> &str {
        &self.description
    }

    /// What the offer costs
    pub const fn price(&self) -> &Price {
        &self.price
    }

    /// How long after creation the offer remains valid
    pub const fn duration(&self) -> Period {
        self.duration
    }

    /// Whether the offer has been withdrawn
    pub const fn cancelled(&self) -> bool {
        self.cancelled
    }
}

// The wire form of `OfferData`; deserializing funnels through `OfferData::new`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
struct OfferDataDto {
    /// Free text describing the offer, at most 1024 characters
    description: String,
    /// What the offer costs
    price: Price,
    /// How long after creation the offer remains valid
    duration: Period,
    /// Whether the offer has been withdrawn
    #[serde(default)]
    cancelled: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<OfferDataDto> for OfferData {
    type Error = ValidationError;

    fn try_from(value: OfferDataDto) -> Result<Self, Self::Error> {
        Self::new(value.description, value.price, value.duration, value.cancelled)
    }
}

#[cfg(feature = "serde")]
impl From<OfferData> for OfferDataDto {
    fn from(value: OfferData) -> Self {
        Self {
            description: value.description,
            price: value.price,
            duration: value.duration,
            cancelled: value.cancelled,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for OfferData {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "OfferData".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        OfferDataDto::json_schema(generator)
    }
}

/// An offer as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    /// The store-assigned identifier
    pub id: OfferId,
    /// When the offer was first persisted; never changes afterwards
    pub created_at: OffsetDateTime,
    /// The caller-controlled fields
    pub data: OfferData,
}

/// The derived state of an offer at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferStatus {
    /// The offer's duration has run out
    pub expired: bool,
    /// The offer is neither cancelled nor expired
    pub active: bool,
}

impl OfferRecord {
    /// The instant the offer's duration runs out, if it is representable.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.data.duration.add_to(self.created_at)
    }

    /// Whether the offer expired strictly before `now`.
    ///
    /// An offer whose expiry instant is exactly `now` has not expired yet.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at < now,
            None => self.data.duration.is_negative(),
        }
    }

    /// Whether the offer is neither cancelled nor expired at `now`.
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        !self.data.cancelled && !self.is_expired(now)
    }

    /// Evaluate the derived flags at `now`.
    pub fn status(&self, now: OffsetDateTime) -> OfferStatus {
        let expired = self.is_expired(now);
        OfferStatus {
            expired,
            active: !self.data.cancelled && !expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso_currency::Currency;
    use rstest::rstest;
    use serde_json::json;
    use time::macros::datetime;

    fn gbp(value: i64) -> Price {
        Price::new(Currency::GBP, Decimal::from(value))
    }

    fn record(duration: Period, cancelled: bool) -> OfferRecord {
        OfferRecord {
            id: OfferId::new(1).unwrap(),
            created_at: datetime!(2024-05-01 10:00 UTC),
            data: OfferData::new("foo", gbp(20), duration, cancelled).unwrap(),
        }
    }

    #[test]
    fn expiry_is_strictly_before_now() {
        let offer = record(Period::days(1), false);
        let expires_at = datetime!(2024-05-02 10:00 UTC);
        assert_eq!(offer.expires_at(), Some(expires_at));

        let just_before = expires_at - time::Duration::nanoseconds(1);
        let just_after = expires_at + time::Duration::nanoseconds(1);

        assert!(!offer.is_expired(just_before));
        assert!(!offer.is_expired(expires_at));
        assert!(offer.is_expired(just_after));
    }

    #[test]
    fn zero_duration_expires_immediately_after_creation() {
        let offer = record(Period::ZERO, false);
        assert!(!offer.is_expired(offer.created_at));
        assert!(offer.is_expired(offer.created_at + time::Duration::milliseconds(1)));
    }

    #[rstest]
    #[case(Period::days(1), false, false, true)]
    #[case(Period::days(1), true, false, false)]
    #[case(Period::days(-1), false, true, false)]
    #[case(Period::days(-1), true, true, false)]
    #[case(Period::years(i32::MAX), false, false, true)]
    #[case(Period::years(i32::MIN), false, true, false)]
    fn active_is_not_cancelled_and_not_expired(
        #[case] duration: Period,
        #[case] cancelled: bool,
        #[case] expired: bool,
        #[case] active: bool,
    ) {
        let offer = record(duration, cancelled);
        let now = datetime!(2024-05-01 12:00 UTC);
        assert_eq!(offer.status(now), OfferStatus { expired, active });
        assert_eq!(offer.is_active(now), !cancelled && !offer.is_expired(now));
    }

    #[test]
    fn description_limits() {
        let ok = "é".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(OfferData::new(ok, gbp(1), Period::days(1), false).is_ok());

        let long = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            OfferData::new(long, gbp(1), Period::days(1), false),
            Err(ValidationError::DescriptionTooLong {
                len: MAX_DESCRIPTION_LENGTH + 1,
                max: MAX_DESCRIPTION_LENGTH
            })
        );

        assert_eq!(
            OfferData::new("", gbp(1), Period::days(1), false),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn price_must_not_be_negative() {
        assert!(OfferData::new("free", gbp(0), Period::days(1), false).is_ok());
        assert_eq!(
            OfferData::new("foo", gbp(-1), Period::days(1), false),
            Err(ValidationError::NegativePrice(Decimal::from(-1)))
        );
    }

    #[test]
    fn offer_ids_are_positive() {
        assert_eq!("7".parse::<OfferId>().map(OfferId::get), Ok(7));
        assert_eq!("0".parse::<OfferId>(), Err(InvalidOfferId));
        assert_eq!("-3".parse::<OfferId>(), Err(InvalidOfferId));
        assert_eq!("abc".parse::<OfferId>(), Err(InvalidOfferId));
    }

    #[test]
    fn chosen_ids_leave_room_for_assigned_ones() {
        let max = OfferId::MAX_CHOSEN;
        assert_eq!(max.chosen(), Ok(max));
        assert_eq!(OfferId::new(1).unwrap().chosen().map(OfferId::get), Ok(1));

        let above = OfferId::new(max.get() + 1).unwrap();
        assert_eq!(
            above.chosen(),
            Err(ValidationError::ChosenIdTooLarge {
                id: max.get() + 1,
                max: max.get(),
            })
        );
        assert!(OfferId::new(i64::MAX).unwrap().chosen().is_err());
    }

    #[test]
    fn deserializes_wire_form() {
        let data: OfferData = serde_json::from_value(json!({
            "description": "foo",
            "price": { "currency": "GBP", "value": "0.50" },
            "duration": "P2M",
        }))
        .unwrap();

        assert_eq!(data.description(), "foo");
        assert_eq!(data.price().currency, Currency::GBP);
        assert_eq!(data.price().value.to_string(), "0.50");
        assert_eq!(data.duration(), Period::months(2));
        assert!(!data.cancelled());
    }

    #[rstest]
    #[case(json!({"description": "foo", "price": {"currency": "X", "value": 20}, "duration": "P1D"}), "not a valid textual representation")]
    #[case(json!({"description": "foo", "price": {"currency": "GBP", "value": 20}, "duration": "PD5M"}), "cannot be parsed to a Period")]
    #[case(json!({"description": "foo", "price": {"currency": "GBP", "value": -5}, "duration": "P1D"}), "greater than or equal to 0")]
    #[case(json!({"description": "", "price": {"currency": "GBP", "value": 20}, "duration": "P1D"}), "must not be empty")]
    #[case(json!({"description": "foo", "price": {"currency": "GBP"}, "duration": "P1D"}), "missing field `value`")]
    #[case(json!({"description": "foo", "price": {"currency": "GBP", "value": 20}}), "missing field `duration`")]
    fn rejects_invalid_wire_form(#[case] body: serde_json::Value, #[case] message: &str) {
        let error = serde_json::from_value::<OfferData>(body).unwrap_err();
        assert!(
            error.to_string().contains(message),
            "'{error}' does not mention '{message}'"
        );
    }

    #[test]
    fn rejects_non_numeric_value() {
        let body = json!({"description": "foo", "price": {"currency": "GBP", "value": "foo"}, "duration": "P1D"});
        assert!(serde_json::from_value::<OfferData>(body).is_err());
    }

    #[test]
    fn serializes_wire_form() {
        let data = OfferData::new("foo", gbp(20), Period::days(1), true).unwrap();
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "description": "foo",
                "price": { "currency": "GBP", "value": 20.0 },
                "duration": "P1D",
                "cancelled": true,
            })
        );
    }
}
