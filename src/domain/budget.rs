use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::{opaque_id, parse_amount, FromApiRecord, Identifiable};
use crate::domain::money::Money;
use crate::domain::range::{end_of_month, start_of_month, DateRange};
use crate::errors::{AggregateError, AggregateResult, RecordError};

const WARNING_THRESHOLD: f64 = 0.7;
const CRITICAL_THRESHOLD: f64 = 0.9;

/// How often a budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCycle {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetCycle {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetCycle::Daily => "Daily",
            BudgetCycle::Weekly => "Weekly",
            BudgetCycle::Monthly => "Monthly",
            BudgetCycle::Yearly => "Yearly",
        }
    }

    /// Inclusive bounds of the cycle containing `date`. Weeks start on Monday.
    pub fn window_containing(&self, date: NaiveDate) -> AggregateResult<DateRange> {
        let out_of_range =
            || AggregateError::InvalidWindow(format!("{} cycle around {date}", self.label()));
        match self {
            BudgetCycle::Daily => Ok(DateRange::single_day(date)),
            BudgetCycle::Weekly => {
                let offset = i64::from(date.weekday().num_days_from_monday());
                let start = date
                    .checked_sub_signed(Duration::days(offset))
                    .ok_or_else(out_of_range)?;
                let end = start
                    .checked_add_signed(Duration::days(6))
                    .ok_or_else(out_of_range)?;
                DateRange::new(start, end)
            }
            BudgetCycle::Monthly => {
                let end = end_of_month(date).ok_or_else(out_of_range)?;
                DateRange::new(start_of_month(date), end)
            }
            BudgetCycle::Yearly => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(out_of_range)?;
                let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).ok_or_else(out_of_range)?;
                DateRange::new(start, end)
            }
        }
    }
}

impl fmt::Display for BudgetCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BudgetCycle {
    type Err = RecordError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(BudgetCycle::Daily),
            "weekly" => Ok(BudgetCycle::Weekly),
            "monthly" => Ok(BudgetCycle::Monthly),
            "yearly" | "annual" | "annually" => Ok(BudgetCycle::Yearly),
            _ => Err(RecordError::UnknownCycle(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawBudget {
    #[serde(default, alias = "id")]
    pub budget_id: Option<Value>,
    #[serde(default)]
    pub client_id: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// A spending limit for one category over a repeating cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Option<String>,
    pub client_id: Option<String>,
    pub category: String,
    pub allocated: Money,
    pub cycle: BudgetCycle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl Budget {
    pub fn new(category: impl Into<String>, allocated: Money, cycle: BudgetCycle) -> Self {
        Self {
            id: None,
            client_id: None,
            category: category.into(),
            allocated,
            cycle,
            created: None,
        }
    }

    /// Category labels match after trimming, ignoring ASCII case.
    pub fn matches_category(&self, label: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(label.trim())
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl FromApiRecord for Budget {
    type Raw = RawBudget;

    fn raw_id(raw: &RawBudget) -> Option<String> {
        opaque_id(raw.budget_id.as_ref())
    }

    fn from_raw(raw: RawBudget) -> Result<Self, RecordError> {
        let category = raw
            .category
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .ok_or(RecordError::MissingField("category"))?;
        let allocated = parse_amount("amount", raw.amount.as_ref())?;
        let cycle = raw
            .cycle
            .as_deref()
            .ok_or(RecordError::MissingField("cycle"))?
            .parse()?;
        Ok(Self {
            id: opaque_id(raw.budget_id.as_ref()),
            client_id: opaque_id(raw.client_id.as_ref()),
            category,
            allocated,
            cycle,
            created: raw.created,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    Critical,
}

/// Spent-versus-allocated snapshot for one budget cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub allocated: Money,
    pub spent: Money,
    /// `spent / allocated`, capped at 1.0.
    pub progress: f64,
    /// Negative when overspent.
    pub remaining: Money,
    pub health: BudgetHealth,
}

impl BudgetProgress {
    pub fn new(allocated: Money, spent: Money) -> AggregateResult<Self> {
        let progress = match spent.ratio_of(allocated) {
            Some(ratio) => ratio.clamp(0.0, 1.0),
            None if spent.is_positive() => 1.0,
            None => 0.0,
        };
        let remaining = allocated
            .checked_sub(spent)
            .ok_or(AggregateError::Overflow("budget remaining"))?;
        let health = if progress >= CRITICAL_THRESHOLD {
            BudgetHealth::Critical
        } else if progress >= WARNING_THRESHOLD {
            BudgetHealth::Warning
        } else {
            BudgetHealth::OnTrack
        };
        Ok(Self {
            allocated,
            spent,
            progress,
            remaining,
            health,
        })
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Body of the create-budget request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBudget {
    pub client_id: String,
    pub category: String,
    pub amount: String,
    pub cycle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_cycle_starts_monday() {
        // 2025-05-14 is a Wednesday.
        let window = BudgetCycle::Weekly.window_containing(date(2025, 5, 14)).unwrap();
        assert_eq!(window.start, date(2025, 5, 12));
        assert_eq!(window.end, date(2025, 5, 18));
    }

    #[test]
    fn monthly_and_yearly_cycles_cover_calendar_units() {
        let month = BudgetCycle::Monthly.window_containing(date(2025, 4, 30)).unwrap();
        assert_eq!((month.start, month.end), (date(2025, 4, 1), date(2025, 4, 30)));
        let year = BudgetCycle::Yearly.window_containing(date(2025, 4, 30)).unwrap();
        assert_eq!((year.start, year.end), (date(2025, 1, 1), date(2025, 12, 31)));
    }

    #[test]
    fn cycle_parsing_is_case_insensitive() {
        assert_eq!("Monthly".parse::<BudgetCycle>().unwrap(), BudgetCycle::Monthly);
        assert_eq!(" weekly ".parse::<BudgetCycle>().unwrap(), BudgetCycle::Weekly);
        assert!(matches!(
            "fortnightly".parse::<BudgetCycle>(),
            Err(RecordError::UnknownCycle(_))
        ));
    }

    #[test]
    fn health_thresholds() {
        let allocated = Money::from_minor(100_00);
        let on_track = BudgetProgress::new(allocated, Money::from_minor(40_00)).unwrap();
        assert_eq!(on_track.health, BudgetHealth::OnTrack);
        let warning = BudgetProgress::new(allocated, Money::from_minor(70_00)).unwrap();
        assert_eq!(warning.health, BudgetHealth::Warning);
        let critical = BudgetProgress::new(allocated, Money::from_minor(90_00)).unwrap();
        assert_eq!(critical.health, BudgetHealth::Critical);
    }

    #[test]
    fn overspending_caps_progress_and_goes_negative() {
        let progress =
            BudgetProgress::new(Money::from_minor(300_00), Money::from_minor(450_00)).unwrap();
        assert_eq!(progress.progress, 1.0);
        assert_eq!(progress.remaining, Money::from_minor(-150_00));
        assert!(progress.is_overspent());
    }

    #[test]
    fn zero_allocation_does_not_divide() {
        let idle = BudgetProgress::new(Money::ZERO, Money::ZERO).unwrap();
        assert_eq!(idle.progress, 0.0);
        let spent = BudgetProgress::new(Money::ZERO, Money::from_minor(1)).unwrap();
        assert_eq!(spent.progress, 1.0);
    }
}
