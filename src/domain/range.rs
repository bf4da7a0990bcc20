use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AggregateError, AggregateResult};

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AggregateResult<Self> {
        if start > end {
            return Err(AggregateError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> AggregateResult<Self> {
        let start = start_of_month(date);
        let end = end_of_month(date).ok_or_else(|| out_of_calendar(date))?;
        Ok(Self { start, end })
    }

    /// The `days` consecutive days ending at `last` inclusive.
    pub fn trailing_days(last: NaiveDate, days: u32) -> AggregateResult<Self> {
        if days == 0 {
            return Err(AggregateError::InvalidWindow(
                "daily window must span at least one day".into(),
            ));
        }
        let start = last
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| out_of_calendar(last))?;
        Ok(Self { start, end: last })
    }

    /// From the first day of the month `months_back` months before `reference`
    /// to the last day of the month containing `reference`.
    pub fn trailing_months(reference: NaiveDate, months_back: u32) -> AggregateResult<Self> {
        let start = start_of_month(reference)
            .checked_sub_months(Months::new(months_back))
            .ok_or_else(|| out_of_calendar(reference))?;
        let end = end_of_month(reference).ok_or_else(|| out_of_calendar(reference))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Composite calendar-month key. Orders by year first, then month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn label(&self) -> &'static str {
        month_label(self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

fn out_of_calendar(date: NaiveDate) -> AggregateError {
    AggregateError::InvalidWindow(format!("window around {date} leaves the supported calendar"))
}
