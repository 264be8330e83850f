use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, UtcOffset};

/// A calendar-based amount of time, in years, months and days.
///
/// Unlike a fixed `Duration`, a period is resolved against a starting instant:
/// `P1M` starting on January 31st ends on the last day of February. Components
/// may be negative, and they need not share a sign.
///
/// The text form follows ISO-8601 (`P1Y2M3D`, `P2W`, `-P1D`, `P-1D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    /// Number of years
    pub years: i32,
    /// Number of months
    pub months: i32,
    /// Number of days
    pub days: i32,
}

/// The reasons a string may fail to parse into a [`Period`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("text '{text}' cannot be parsed to a Period: {reason}")]
pub struct PeriodError {
    text: String,
    reason: &'static str,
}

impl PeriodError {
    fn new(text: &str, reason: &'static str) -> Self {
        Self {
            text: text.to_string(),
            reason,
        }
    }
}

impl Period {
    /// The empty period
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Construct a period from its components.
    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// A period of the given number of days.
    pub const fn days(days: i32) -> Self {
        Self::new(0, 0, days)
    }

    /// A period of the given number of months.
    pub const fn months(months: i32) -> Self {
        Self::new(0, months, 0)
    }

    /// A period of the given number of years.
    pub const fn years(years: i32) -> Self {
        Self::new(years, 0, 0)
    }

    /// True if every component is zero.
    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// The years and months components expressed in months.
    pub fn total_months(&self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }

    /// Whether the period points into the past, treating a month as 31 days.
    ///
    /// Only used when the exact end instant cannot be represented.
    pub fn is_negative(&self) -> bool {
        self.total_months() * 31 + i64::from(self.days) < 0
    }

    /// Add this period to `instant`, evaluated in UTC.
    ///
    /// Months are applied first (clamping the day to the end of the target
    /// month), followed by days. Returns `None` if the result is outside the
    /// supported date range.
    pub fn add_to(&self, instant: OffsetDateTime) -> Option<OffsetDateTime> {
        let instant = instant.to_offset(UtcOffset::UTC);
        let shifted = add_months(instant, self.total_months())?;
        shifted.checked_add(time::Duration::days(self.days.into()))
    }
}

fn add_months(instant: OffsetDateTime, months: i64) -> Option<OffsetDateTime> {
    if months == 0 {
        return Some(instant);
    }

    let index = i64::from(instant.year()) * 12 + i64::from(u8::from(instant.month())) - 1 + months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = instant.day().min(month_length(year, month));
    let date = Date::from_calendar_date(year, month, day).ok()?;

    Some(instant.replace_date(date))
}

fn month_length(year: i32, month: Month) -> u8 {
    match month {
        Month::February if time::util::is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }
        write!(f, "P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (negate, rest) = split_sign(text);
        let Some(mut rest) = rest
            .strip_prefix('P')
            .or_else(|| rest.strip_prefix('p'))
        else {
            return Err(PeriodError::new(text, "missing 'P' designator"));
        };

        if rest.is_empty() {
            return Err(PeriodError::new(text, "no components"));
        }

        // Each designator may appear at most once, and only in this order
        let mut values = [None::<i32>; 4];
        let mut next = 0;
        while !rest.is_empty() {
            let (sign, digits) = split_sign(rest);
            let len = digits.bytes().take_while(u8::is_ascii_digit).count();
            if len == 0 {
                return Err(PeriodError::new(text, "expected a number"));
            }
            let Some(unit) = digits[len..].chars().next() else {
                return Err(PeriodError::new(text, "missing unit designator"));
            };
            let slot = match unit.to_ascii_uppercase() {
                'Y' => 0,
                'M' => 1,
                'W' => 2,
                'D' => 3,
                _ => return Err(PeriodError::new(text, "unknown unit designator")),
            };
            if slot < next {
                return Err(PeriodError::new(text, "unit designators out of order"));
            }

            // The sign is applied before narrowing, so i32::MIN is reachable
            let value = digits[..len]
                .parse::<i64>()
                .ok()
                .map(|magnitude| if sign { -magnitude } else { magnitude })
                .and_then(|value| i32::try_from(value).ok())
                .ok_or_else(|| PeriodError::new(text, "component out of range"))?;
            values[slot] = Some(value);
            next = slot + 1;
            rest = &digits[len + unit.len_utf8()..];
        }

        let [years, months, weeks, days] = values.map(Option::unwrap_or_default);
        let days = weeks
            .checked_mul(7)
            .and_then(|weeks| weeks.checked_add(days))
            .ok_or_else(|| PeriodError::new(text, "component out of range"))?;

        let period = Self::new(years, months, days);
        if negate {
            period
                .checked_neg()
                .ok_or_else(|| PeriodError::new(text, "component out of range"))
        } else {
            Ok(period)
        }
    }
}

impl Period {
    fn checked_neg(self) -> Option<Self> {
        Some(Self::new(
            self.years.checked_neg()?,
            self.months.checked_neg()?,
            self.days.checked_neg()?,
        ))
    }
}

/// Split an optional leading `+` or `-`, reporting whether it was negative.
fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Period {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Period".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "description": "An ISO-8601 period, e.g. P1D or P1Y2M",
            "examples": ["P1D", "P3M", "P-1D"],
        })
    }
}
