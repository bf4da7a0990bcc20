#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use smartpurse_core::{Direction, Money, Transaction};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn cents(minor: i64) -> Money {
    Money::from_minor(minor)
}

pub fn credit(day: NaiveDate, minor: i64) -> Transaction {
    Transaction::credit(day, cents(minor))
}

pub fn debit(day: NaiveDate, minor: i64) -> Transaction {
    Transaction::debit(day, cents(minor))
}

pub fn other(day: NaiveDate, minor: i64, raw: &str) -> Transaction {
    Transaction::new(day, cents(minor), Direction::Unrecognized(raw.to_string()))
}

/// Salary on the 1st and groceries on the 14th of May 2025.
pub const MAY_FEED: &str = r#"[
    {"transaction_id": 101, "transaction_date": "2025-05-01", "amount": "2500.00", "trans_type": "CREDIT"},
    {"transaction_id": 102, "transaction_date": "2025-05-14T09:30:00Z", "amount": "80.00", "trans_type": "DEBIT", "category": "Food"}
]"#;

pub const GOALS: &str = r#"[
    {"goal_id": 1, "client_id": "24021055", "goal_name": "Emergency Fund", "current_amount": "500.00", "target_amount": "5000.00", "deadline": "2025-11-14 00:00:00"},
    {"goal_id": 2, "client_id": "24021055", "goal_name": "New Laptop", "current_amount": "1200.00", "target_amount": "1200.00", "deadline": "2025-08-14"}
]"#;

pub const BUDGETS: &str = r#"[
    {"budget_id": 7, "client_id": "24021055", "category": "Food", "amount": "100.00", "cycle": "Monthly", "created": "2025-05-01"},
    {"budget_id": 8, "client_id": "24021055", "category": "Transport", "amount": 150, "cycle": "weekly"}
]"#;

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
