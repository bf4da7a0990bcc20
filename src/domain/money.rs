use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MINOR_PER_MAJOR: i64 = 100;
const MINOR_SCALE: u32 = 2;

/// Monetary amount held as integer minor units (cents).
///
/// Every sum in the crate goes through [`Money::checked_add`] so displayed
/// totals match a manual sum of the same inputs to the cent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Reasons a decimal value cannot be read as [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,
    #[error("amount `{0}` is not a plain decimal number")]
    Malformed(String),
    #[error("amount `{0}` has more than two significant decimal places")]
    TooPrecise(String),
    #[error("amount `{0}` is out of range")]
    Overflow(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Exact conversion; rejects values with sub-cent digits.
    pub fn from_decimal(value: Decimal) -> Result<Self, ParseMoneyError> {
        let normalized = value.normalize();
        if normalized.scale() > MINOR_SCALE {
            return Err(ParseMoneyError::TooPrecise(value.to_string()));
        }
        normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .map(Money)
            .ok_or_else(|| ParseMoneyError::Overflow(value.to_string()))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_SCALE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Sums an iterator of amounts, returning `None` on overflow.
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Value in major units. Only for ratios and display, never for sums.
    pub fn as_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// `self / whole`, or `None` when `whole` is not positive.
    pub fn ratio_of(self, whole: Money) -> Option<f64> {
        if whole.0 <= 0 {
            return None;
        }
        Some(self.0 as f64 / whole.0 as f64)
    }

    /// Splits into (whole units, cents) of the absolute value.
    pub fn split_abs(self) -> (u64, u64) {
        let abs = self.0.unsigned_abs();
        (abs / MINOR_PER_MAJOR as u64, abs % MINOR_PER_MAJOR as u64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        let value = Decimal::from_str_exact(trimmed)
            .map_err(|_| ParseMoneyError::Malformed(trimmed.to_string()))?;
        Money::from_decimal(value)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ParseMoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> de::Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        money_from_f64(value).map_err(E::custom)
    }
}

/// Reads a JSON float at its shortest decimal value, so `50.1` stays 50.10.
pub(crate) fn money_from_f64(value: f64) -> Result<Money, ParseMoneyError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ParseMoneyError::Malformed(value.to_string()))
        .and_then(Money::from_decimal)
}
