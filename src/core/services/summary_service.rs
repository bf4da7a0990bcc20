//! Period totals, trailing income/expense series and savings ratios.
//!
//! Every function here is pure: the same transactions, reference date and
//! window size always produce the same value, and inputs are never mutated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::money::Money;
use crate::domain::range::{DateRange, MonthKey};
use crate::domain::transaction::{Direction, Transaction};
use crate::errors::{AggregateError, AggregateResult};

const DAY_LABEL_FORMAT: &str = "%-d %b";

/// Bucket for expenses that carry no category.
pub const UNCATEGORIZED_LABEL: &str = "Others";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub total_income: Money,
    pub total_expenses: Money,
    /// May be negative.
    pub balance: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncomeEntry {
    pub key: MonthKey,
    pub label: String,
    pub total: Money,
}

/// Only months with income appear; there is no zero-fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncomeSeries {
    pub window: DateRange,
    pub entries: Vec<MonthlyIncomeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyExpenseEntry {
    pub date: NaiveDate,
    pub label: String,
    pub total: Money,
}

/// One entry per day of the window, oldest first, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyExpenseSeries {
    pub window: DateRange,
    pub entries: Vec<DailyExpenseEntry>,
}

impl DailyExpenseSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = Money> + '_ {
        self.entries.iter().map(|entry| entry.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    /// Fraction of all expenses in the range.
    pub share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseStatistics {
    pub total: Money,
    /// `total / days` in major units, over every day of the window.
    pub average: f64,
    pub peak: Money,
    pub days: usize,
}

impl ExpenseStatistics {
    /// The average rounded half away from zero to whole cents.
    pub fn average_rounded(&self) -> Money {
        if self.days == 0 {
            return Money::ZERO;
        }
        let days = self.days as i128;
        let minor = i128::from(self.total.minor_units());
        let rounded = (minor.abs() * 2 + days) / (days * 2);
        let signed = if minor < 0 { -rounded } else { rounded };
        Money::from_minor(signed as i64)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Income, expenses and balance for transactions dated inside `range`.
    pub fn summarize_period(
        transactions: &[Transaction],
        range: DateRange,
    ) -> AggregateResult<PeriodSummary> {
        let mut total_income = Money::ZERO;
        let mut total_expenses = Money::ZERO;
        let mut transaction_count = 0;

        for txn in transactions.iter().filter(|txn| range.contains(txn.date)) {
            match txn.direction {
                Direction::Credit => {
                    total_income = total_income
                        .checked_add(txn.amount)
                        .ok_or(AggregateError::Overflow("period income"))?;
                }
                Direction::Debit => {
                    total_expenses = total_expenses
                        .checked_add(txn.amount)
                        .ok_or(AggregateError::Overflow("period expenses"))?;
                }
                Direction::Unrecognized(_) => continue,
            }
            transaction_count += 1;
        }

        let balance = total_income
            .checked_sub(total_expenses)
            .ok_or(AggregateError::Overflow("period balance"))?;
        debug!(%range, %total_income, %total_expenses, transaction_count, "summarized period");
        Ok(PeriodSummary {
            range,
            total_income,
            total_expenses,
            balance,
            transaction_count,
        })
    }

    /// Income per calendar month from `months_back` months before the
    /// reference month through the end of the reference month.
    pub fn monthly_income(
        transactions: &[Transaction],
        months_back: u32,
        reference: NaiveDate,
    ) -> AggregateResult<MonthlyIncomeSeries> {
        let window = DateRange::trailing_months(reference, months_back)?;
        let mut totals: BTreeMap<MonthKey, Money> = BTreeMap::new();

        for txn in transactions
            .iter()
            .filter(|txn| txn.is_income() && window.contains(txn.date))
        {
            let slot = totals.entry(MonthKey::of(txn.date)).or_default();
            *slot = slot
                .checked_add(txn.amount)
                .ok_or(AggregateError::Overflow("monthly income"))?;
        }

        let entries: Vec<MonthlyIncomeEntry> = totals
            .into_iter()
            .map(|(key, total)| MonthlyIncomeEntry {
                key,
                label: key.label().to_string(),
                total,
            })
            .collect();
        debug!(%window, months = entries.len(), "built monthly income series");
        Ok(MonthlyIncomeSeries { window, entries })
    }

    /// Expenses per day for the `days_back` days ending at `reference`.
    /// Callers holding a timestamp pass its calendar date.
    pub fn daily_expenses(
        transactions: &[Transaction],
        days_back: u32,
        reference: NaiveDate,
    ) -> AggregateResult<DailyExpenseSeries> {
        let window = DateRange::trailing_days(reference, days_back)?;
        let mut totals: BTreeMap<NaiveDate, Money> = BTreeMap::new();

        for txn in transactions
            .iter()
            .filter(|txn| txn.is_expense() && window.contains(txn.date))
        {
            let slot = totals.entry(txn.date).or_default();
            *slot = slot
                .checked_add(txn.amount)
                .ok_or(AggregateError::Overflow("daily expenses"))?;
        }

        let entries: Vec<DailyExpenseEntry> = window
            .days()
            .map(|date| DailyExpenseEntry {
                date,
                label: date.format(DAY_LABEL_FORMAT).to_string(),
                total: totals.get(&date).copied().unwrap_or_default(),
            })
            .collect();
        debug!(%window, days = entries.len(), "built daily expense series");
        Ok(DailyExpenseSeries { window, entries })
    }

    /// Expenses in `range` grouped by category, largest first.
    ///
    /// Labels compare case-insensitively; a group keeps the spelling of its
    /// first transaction. Ties order by label. Uncategorized spending is
    /// always the last entry and only appears when non-zero.
    pub fn spending_by_category(
        transactions: &[Transaction],
        range: DateRange,
    ) -> AggregateResult<Vec<CategorySpending>> {
        let mut groups: BTreeMap<String, (String, Money)> = BTreeMap::new();
        let mut uncategorized = Money::ZERO;
        let mut total = Money::ZERO;

        for txn in transactions
            .iter()
            .filter(|txn| txn.is_expense() && range.contains(txn.date))
        {
            total = total
                .checked_add(txn.amount)
                .ok_or(AggregateError::Overflow("category spending"))?;
            let slot = match txn.category.as_deref() {
                Some(label) => {
                    &mut groups
                        .entry(label.to_ascii_lowercase())
                        .or_insert_with(|| (label.to_string(), Money::ZERO))
                        .1
                }
                None => &mut uncategorized,
            };
            *slot = slot
                .checked_add(txn.amount)
                .ok_or(AggregateError::Overflow("category spending"))?;
        }

        let share = |amount: Money| amount.ratio_of(total).unwrap_or(0.0);
        let mut entries: Vec<CategorySpending> = groups
            .into_values()
            .map(|(category, amount)| CategorySpending {
                category,
                total: amount,
                share: share(amount),
            })
            .collect();
        entries.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        if uncategorized.is_positive() {
            entries.push(CategorySpending {
                category: UNCATEGORIZED_LABEL.to_string(),
                total: uncategorized,
                share: share(uncategorized),
            });
        }
        debug!(%range, categories = entries.len(), "grouped spending by category");
        Ok(entries)
    }

    pub fn expense_statistics(series: &DailyExpenseSeries) -> AggregateResult<ExpenseStatistics> {
        let total = Money::checked_sum(series.values())
            .ok_or(AggregateError::Overflow("expense statistics"))?;
        let peak = series.values().max().unwrap_or_default();
        let days = series.len();
        let average = if days == 0 {
            0.0
        } else {
            total.as_major_f64() / days as f64
        };
        Ok(ExpenseStatistics {
            total,
            average,
            peak,
            days,
        })
    }

    /// Percentage of income saved. Zero when there is no income; may exceed 100.
    pub fn savings_rate(total_income: Money, total_saved: Money) -> f64 {
        total_saved
            .ratio_of(total_income)
            .map(|ratio| ratio * 100.0)
            .unwrap_or(0.0)
    }
}
