//! Record-by-record parsing of API payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::common::{FromApiRecord, Identifiable};
use crate::domain::transaction::Transaction;
use crate::errors::{FeedError, RecordError};

/// Parsed records plus the problems found while reading them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFeed<T> {
    pub records: Vec<T>,
    pub issues: Vec<RecordIssue>,
}

impl<T> Default for ParsedFeed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            issues: Vec::new(),
        }
    }
}

impl<T> ParsedFeed<T> {
    pub fn excluded_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.excluded).count()
    }
}

impl<T: Identifiable> ParsedFeed<T> {
    /// First record carrying the given API identifier.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == Some(id))
    }
}

pub type TransactionFeed = ParsedFeed<Transaction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Malformed,
    MissingField,
    InvalidAmount,
    InvalidDate,
    UnknownDirection,
    UnknownCycle,
}

impl IssueKind {
    pub fn of(error: &RecordError) -> Self {
        match error {
            RecordError::Malformed(_) => IssueKind::Malformed,
            RecordError::MissingField(_) => IssueKind::MissingField,
            RecordError::InvalidAmount { .. } | RecordError::NegativeAmount { .. } => {
                IssueKind::InvalidAmount
            }
            RecordError::InvalidDate(_) => IssueKind::InvalidDate,
            RecordError::UnknownDirection(_) => IssueKind::UnknownDirection,
            RecordError::UnknownCycle(_) => IssueKind::UnknownCycle,
        }
    }
}

/// A warning about one record. `excluded` records contribute to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIssue {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: IssueKind,
    pub message: String,
    pub excluded: bool,
}

impl RecordIssue {
    fn new(index: usize, id: Option<String>, error: &RecordError, excluded: bool) -> Self {
        Self {
            index,
            id,
            kind: IssueKind::of(error),
            message: error.to_string(),
            excluded,
        }
    }
}

pub struct FeedService;

impl FeedService {
    /// Parses a JSON array document. Only a non-array payload is fatal.
    pub fn parse_json<T: FromApiRecord>(text: &str) -> Result<ParsedFeed<T>, FeedError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Array(items) => Ok(Self::parse_values(items)),
            _ => Err(FeedError::NotAnArray),
        }
    }

    pub fn parse_values<T: FromApiRecord>(values: Vec<Value>) -> ParsedFeed<T> {
        let mut feed = ParsedFeed::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T::Raw>(value) {
                Ok(raw) => Self::accept(&mut feed, index, raw),
                Err(err) => {
                    let error = RecordError::Malformed(err.to_string());
                    Self::reject(&mut feed, index, None, error);
                }
            }
        }
        Self::finish(feed)
    }

    pub fn parse_records<T: FromApiRecord>(raws: Vec<T::Raw>) -> ParsedFeed<T> {
        let mut feed = ParsedFeed::default();
        for (index, raw) in raws.into_iter().enumerate() {
            Self::accept(&mut feed, index, raw);
        }
        Self::finish(feed)
    }

    fn accept<T: FromApiRecord>(feed: &mut ParsedFeed<T>, index: usize, raw: T::Raw) {
        let id = T::raw_id(&raw);
        match T::from_raw(raw) {
            Ok(record) => {
                if let Some(advisory) = record.advisory() {
                    warn!(index, id = ?id, %advisory, "record kept but not counted");
                    feed.issues
                        .push(RecordIssue::new(index, id, &advisory, false));
                }
                feed.records.push(record);
            }
            Err(error) => Self::reject(feed, index, id, error),
        }
    }

    fn reject<T>(feed: &mut ParsedFeed<T>, index: usize, id: Option<String>, error: RecordError) {
        warn!(index, id = ?id, %error, "skipping record");
        feed.issues.push(RecordIssue::new(index, id, &error, true));
    }

    fn finish<T>(feed: ParsedFeed<T>) -> ParsedFeed<T> {
        debug!(
            records = feed.records.len(),
            issues = feed.issues.len(),
            "parsed feed"
        );
        feed
    }
}
