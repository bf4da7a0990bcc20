//! C ABI for mobile hosts. Inputs and outputs are JSON strings.
//!
//! Every returned `*mut c_char` is owned by the caller and must be released
//! with [`smartpurse_string_free`]. On failure a function returns null and
//! records the error for [`smartpurse_last_error_message`] on the calling thread.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::config::ReportConfig;
use crate::core::services::{
    DashboardReport, FeedService, ParsedFeed, RecordIssue, ReportService, SummaryService,
    TransactionFeed,
};
use crate::core::{Clock, SystemClock};
use crate::domain::budget::Budget;
use crate::domain::common::FromApiRecord;
use crate::domain::goal::SavingGoal;
use crate::domain::range::DateRange;
use crate::errors::{PurseError, Result};

/// Semantic version of the FFI surface. Bumps when the ABI or JSON contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Error categories surfaced across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCategory {
    Ok = 0,
    InvalidArgument = 1,
    Feed = 2,
    Aggregate = 3,
    Internal = 4,
}

impl From<FfiErrorCategory> for i32 {
    fn from(value: FfiErrorCategory) -> Self {
        value as i32
    }
}

pub fn classify_error(err: &PurseError) -> FfiErrorCategory {
    match err {
        PurseError::InvalidInput(_) | PurseError::Validation(_) | PurseError::Config(_) => {
            FfiErrorCategory::InvalidArgument
        }
        PurseError::Feed(_) => FfiErrorCategory::Feed,
        PurseError::Aggregate(_) => FfiErrorCategory::Aggregate,
        PurseError::Io(_) | PurseError::Serde(_) => FfiErrorCategory::Internal,
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<(FfiErrorCategory, String)>> = const { RefCell::new(None) };
}

fn clear_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

fn record_error(err: &PurseError) {
    let category = classify_error(err);
    warn!(?category, %err, "ffi call failed");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some((category, err.to_string())));
}

/// Runs `body`, turning its JSON result into an owned C string or null.
fn respond(body: impl FnOnce() -> Result<String>) -> *mut c_char {
    clear_error();
    let outcome = body().and_then(|json| {
        CString::new(json)
            .map_err(|_| PurseError::InvalidInput("response contains a NUL byte".into()))
    });
    match outcome {
        Ok(cstring) => cstring.into_raw(),
        Err(err) => {
            record_error(&err);
            ptr::null_mut()
        }
    }
}

unsafe fn required_str(ptr: *const c_char, name: &str) -> Result<String> {
    optional_str(ptr, name)?
        .ok_or_else(|| PurseError::InvalidInput(format!("`{}` must not be null", name)))
}

unsafe fn optional_str(ptr: *const c_char, name: &str) -> Result<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|text| Some(text.to_string()))
        .map_err(|_| PurseError::InvalidInput(format!("`{}` is not valid UTF-8", name)))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| PurseError::InvalidInput(format!("`{}` is not a YYYY-MM-DD date", text)))
}

/// Dashboard JSON plus the goal and budget records that could not be read.
/// Transaction issues are already part of the report.
#[derive(Serialize)]
struct DashboardResponse<'a> {
    #[serde(flatten)]
    report: &'a DashboardReport,
    record_issues: RecordIssues,
}

#[derive(Serialize)]
struct RecordIssues {
    goals: Vec<RecordIssue>,
    budgets: Vec<RecordIssue>,
}

fn optional_feed<T: FromApiRecord>(text: Option<String>) -> Result<ParsedFeed<T>> {
    match text {
        Some(text) => Ok(FeedService::parse_json(&text)?),
        None => Ok(ParsedFeed::default()),
    }
}

/// Returns the FFI interface version as a static C string. Do not free it.
#[no_mangle]
pub extern "C" fn smartpurse_ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Builds the dashboard report.
///
/// `goals_json`, `budgets_json`, `reference_date` and `config_json` may be null:
/// no goals, no budgets, today (UTC) and default settings respectively.
/// Unreadable goal and budget records are skipped and listed under
/// `record_issues.goals` / `record_issues.budgets`.
///
/// # Safety
/// Every non-null pointer must reference a NUL-terminated string that stays
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn smartpurse_dashboard_json(
    transactions_json: *const c_char,
    goals_json: *const c_char,
    budgets_json: *const c_char,
    reference_date: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    respond(|| {
        let transactions = required_str(transactions_json, "transactions_json")?;
        let feed: TransactionFeed = FeedService::parse_json(&transactions)?;
        let goals: ParsedFeed<SavingGoal> =
            optional_feed(optional_str(goals_json, "goals_json")?)?;
        let budgets: ParsedFeed<Budget> =
            optional_feed(optional_str(budgets_json, "budgets_json")?)?;
        let reference = match optional_str(reference_date, "reference_date")? {
            Some(text) => parse_date(&text)?,
            None => SystemClock.today(),
        };
        let config = match optional_str(config_json, "config_json")? {
            Some(text) => serde_json::from_str::<ReportConfig>(&text)?,
            None => ReportConfig::default(),
        };
        config.validate()?;
        let report =
            ReportService::build(&feed, &goals.records, &budgets.records, reference, &config)?;
        let response = DashboardResponse {
            report: &report,
            record_issues: RecordIssues {
                goals: goals.issues,
                budgets: budgets.issues,
            },
        };
        Ok(serde_json::to_string(&response)?)
    })
}

/// Income, expenses and balance over the inclusive `start..=end` range.
///
/// # Safety
/// All pointers must reference NUL-terminated strings valid for the call.
#[no_mangle]
pub unsafe extern "C" fn smartpurse_summary_json(
    transactions_json: *const c_char,
    start_date: *const c_char,
    end_date: *const c_char,
) -> *mut c_char {
    respond(|| {
        let transactions = required_str(transactions_json, "transactions_json")?;
        let start = parse_date(&required_str(start_date, "start_date")?)?;
        let end = parse_date(&required_str(end_date, "end_date")?)?;
        let feed: TransactionFeed = FeedService::parse_json(&transactions)?;
        let range = DateRange::new(start, end)?;
        let summary = SummaryService::summarize_period(&feed.records, range)?;
        Ok(serde_json::to_string(&summary)?)
    })
}

/// Message of the last failure on this thread, or null. Free with
/// [`smartpurse_string_free`].
#[no_mangle]
pub extern "C" fn smartpurse_last_error_message() -> *mut c_char {
    LAST_ERROR.with(|slot| match slot.borrow().as_ref() {
        Some((_, message)) => CString::new(message.as_str())
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut()),
        None => ptr::null_mut(),
    })
}

/// Category code of the last failure on this thread; `0` when the last call succeeded.
#[no_mangle]
pub extern "C" fn smartpurse_last_error_category() -> i32 {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|(category, _)| i32::from(*category))
            .unwrap_or(FfiErrorCategory::Ok.into())
    })
}

/// Releases a string returned by this library. Null is ignored.
///
/// # Safety
/// `value` must come from this library and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn smartpurse_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    drop(CString::from_raw(value));
}
