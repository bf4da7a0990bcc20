use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::money::ParseMoneyError;

/// Caller mistakes detected before any aggregation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Invalid range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("Monetary total overflowed while summing {0}")]
    Overflow(&'static str),
}

pub type AggregateResult<T> = std::result::Result<T, AggregateError>;

/// Problems with a single API record. Never aborts a whole feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid amount in `{field}`: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: ParseMoneyError,
    },
    #[error("negative amount `{value}` in `{field}`")]
    NegativeAmount { field: &'static str, value: String },
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("unknown transaction direction `{0}`")]
    UnknownDirection(String),
    #[error("unknown budget cycle `{0}`")]
    UnknownCycle(String),
}

/// Payload-level failures: the document itself is unusable.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Feed must be a JSON array of records")]
    NotAnArray,
}

/// Rejected create/update request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("deadline {deadline} is before {today}")]
    DeadlineInPast { deadline: NaiveDate, today: NaiveDate },
    #[error("amount overflow in {0}")]
    Overflow(&'static str),
}

/// Configuration load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Unified error surfaced by the CLI and the C ABI.
#[derive(Debug, Error)]
pub enum PurseError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PurseError>;
