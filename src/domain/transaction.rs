use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::{opaque_id, parse_amount, parse_api_date, FromApiRecord, Identifiable};
use crate::domain::money::Money;
use crate::errors::RecordError;

/// Transaction record exactly as the API returns it. Every field is optional
/// so a malformed record is reported instead of failing the whole array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Value>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub trans_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Money flow direction. Anything other than `CREDIT`/`DEBIT` is kept verbatim
/// and never counted as income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    Credit,
    Debit,
    Unrecognized(String),
}

impl Direction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "CREDIT" => Direction::Credit,
            "DEBIT" => Direction::Debit,
            other => Direction::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Direction::Credit => "CREDIT",
            Direction::Debit => "DEBIT",
            Direction::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        Direction::parse(&value)
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.as_str().to_string()
    }
}

/// Validated transaction used by every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub amount: Money,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Money, direction: Direction) -> Self {
        Self {
            id: None,
            date,
            amount,
            direction,
            category: None,
        }
    }

    pub fn credit(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, Direction::Credit)
    }

    pub fn debit(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, Direction::Debit)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Credit
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// Signed effect on the balance: `None` for unrecognized directions.
    pub fn signed_amount(&self) -> Option<Money> {
        match self.direction {
            Direction::Credit => Some(self.amount),
            Direction::Debit => Money::ZERO.checked_sub(self.amount),
            Direction::Unrecognized(_) => None,
        }
    }

    pub fn try_from_raw(raw: RawTransaction) -> Result<Self, RecordError> {
        let date_text = raw
            .transaction_date
            .as_deref()
            .ok_or(RecordError::MissingField("transaction_date"))?;
        let date = parse_api_date(date_text)?;
        let amount = parse_amount("amount", raw.amount.as_ref())?;
        let direction = raw
            .trans_type
            .as_deref()
            .map(Direction::parse)
            .ok_or(RecordError::MissingField("trans_type"))?;
        let category = raw
            .category
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty());
        Ok(Self {
            id: opaque_id(raw.transaction_id.as_ref()),
            date,
            amount,
            direction,
            category,
        })
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl FromApiRecord for Transaction {
    type Raw = RawTransaction;

    fn raw_id(raw: &RawTransaction) -> Option<String> {
        opaque_id(raw.transaction_id.as_ref())
    }

    fn from_raw(raw: RawTransaction) -> Result<Self, RecordError> {
        Transaction::try_from_raw(raw)
    }

    fn advisory(&self) -> Option<RecordError> {
        match &self.direction {
            Direction::Unrecognized(raw) => Some(RecordError::UnknownDirection(raw.clone())),
            _ => None,
        }
    }
}
