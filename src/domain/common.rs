use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::money::{money_from_f64, Money, ParseMoneyError};
use crate::errors::RecordError;

/// Identifies records that carry the API's opaque identifier.
pub trait Identifiable {
    fn id(&self) -> Option<&str>;
}

/// Conversion from a loosely-typed API record into a validated domain value.
pub trait FromApiRecord: Sized {
    type Raw: DeserializeOwned;

    fn raw_id(raw: &Self::Raw) -> Option<String>;

    fn from_raw(raw: Self::Raw) -> Result<Self, RecordError>;

    /// A non-fatal problem worth reporting even though the record is kept.
    fn advisory(&self) -> Option<RecordError> {
        None
    }
}

/// Renders an opaque identifier that may arrive as a string or a number.
pub fn opaque_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Reads a non-negative amount from a string or numeric JSON value.
pub fn parse_amount(field: &'static str, value: Option<&Value>) -> Result<Money, RecordError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(RecordError::MissingField(field)),
        Some(Value::String(text)) => text.parse::<Money>(),
        Some(Value::Number(number)) => match (number.as_i64(), number.as_u64()) {
            (Some(whole), _) => Money::from_decimal(Decimal::from(whole)),
            (None, Some(whole)) => Money::from_decimal(Decimal::from(whole)),
            (None, None) => number
                .as_f64()
                .ok_or_else(|| ParseMoneyError::Malformed(number.to_string()))
                .and_then(money_from_f64),
        },
        Some(other) => Err(ParseMoneyError::Malformed(other.to_string())),
    };
    let amount = parsed.map_err(|source| RecordError::InvalidAmount { field, source })?;
    if amount.is_negative() {
        return Err(RecordError::NegativeAmount {
            field,
            value: amount.to_string(),
        });
    }
    Ok(amount)
}

/// Parses `YYYY-MM-DD`, ignoring any `T...` or ` ...` time-of-day suffix.
pub fn parse_api_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let trimmed = raw.trim();
    let invalid = || RecordError::InvalidDate(trimmed.to_string());
    let (day_part, rest) = match trimmed.char_indices().nth(10) {
        Some((split, _)) => trimmed.split_at(split),
        None => (trimmed, ""),
    };
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").map_err(|_| invalid())
}
