use iso_currency::Currency;
use rust_decimal::Decimal;

/// An amount of money in a particular currency.
///
/// No arithmetic or conversion is offered; the amount is stored exactly as
/// given, scale included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Price {
    /// The ISO-4217 currency the amount is denominated in
    #[cfg_attr(feature = "serde", serde(with = "currency_code"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub currency: Currency,

    /// The non-negative amount
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "rust_decimal::serde::float::serialize")
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "f64"))]
    pub value: Decimal,
}

impl Price {
    /// Construct a price from its components.
    pub const fn new(currency: Currency, value: Decimal) -> Self {
        Self { currency, value }
    }
}

/// Resolve an ISO-4217 alphabetic code (e.g. "GBP") to a currency.
pub fn parse_currency(code: &str) -> Option<Currency> {
    Currency::from_code(code)
}

// Currencies travel as their three-letter code
#[cfg(feature = "serde")]
mod currency_code {
    use iso_currency::Currency;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(currency: &Currency, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(currency.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Currency, D::Error> {
        let code = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        super::parse_currency(&code).ok_or_else(|| {
            D::Error::custom(format!(
                "'{code}' is not a valid textual representation of an ISO-4217 currency code"
            ))
        })
    }
}
