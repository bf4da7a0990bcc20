//! Budget cycle windows, spending progress and create-budget payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::services::feed_service::{FeedService, ParsedFeed};
use crate::domain::budget::{Budget, BudgetCycle, BudgetProgress, NewBudget};
use crate::domain::money::Money;
use crate::domain::range::DateRange;
use crate::domain::transaction::Transaction;
use crate::errors::{AggregateError, AggregateResult, FeedError, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub cycle: BudgetCycle,
    pub window: DateRange,
    pub progress: BudgetProgress,
}

/// Stateless helpers over budgets fetched from the API.
pub struct BudgetService;

impl BudgetService {
    pub fn parse_json(text: &str) -> Result<ParsedFeed<Budget>, FeedError> {
        FeedService::parse_json(text)
    }

    /// Expenses in the budget's category during the cycle containing `reference`.
    pub fn spent_in_cycle(
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> AggregateResult<Money> {
        let window = budget.cycle.window_containing(reference)?;
        Self::spent_in_window(budget, transactions, window)
    }

    pub fn status(
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> AggregateResult<BudgetStatus> {
        let window = budget.cycle.window_containing(reference)?;
        let spent = Self::spent_in_window(budget, transactions, window)?;
        let progress = BudgetProgress::new(budget.allocated, spent)?;
        debug!(category = %budget.category, %window, %spent, "budget progress");
        Ok(BudgetStatus {
            id: budget.id.clone(),
            category: budget.category.clone(),
            cycle: budget.cycle,
            window,
            progress,
        })
    }

    pub fn statuses(
        budgets: &[Budget],
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> AggregateResult<Vec<BudgetStatus>> {
        budgets
            .iter()
            .map(|budget| Self::status(budget, transactions, reference))
            .collect()
    }

    /// Sum of allocations for budgets on the given cycle.
    pub fn total_allocated(budgets: &[Budget], cycle: BudgetCycle) -> AggregateResult<Money> {
        Money::checked_sum(
            budgets
                .iter()
                .filter(|budget| budget.cycle == cycle)
                .map(|budget| budget.allocated),
        )
        .ok_or(AggregateError::Overflow("total allocated"))
    }

    pub fn new_budget(
        client_id: &str,
        category: &str,
        amount: Money,
        cycle: BudgetCycle,
    ) -> Result<NewBudget, ValidationError> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(ValidationError::Blank("client id"));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::Blank("category"));
        }
        if !amount.is_positive() {
            return Err(ValidationError::NotPositive("budget amount"));
        }
        Ok(NewBudget {
            client_id: client_id.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
            cycle: cycle.label().to_string(),
        })
    }

    fn spent_in_window(
        budget: &Budget,
        transactions: &[Transaction],
        window: DateRange,
    ) -> AggregateResult<Money> {
        Money::checked_sum(
            transactions
                .iter()
                .filter(|txn| txn.is_expense() && window.contains(txn.date))
                .filter(|txn| {
                    txn.category
                        .as_deref()
                        .is_some_and(|label| budget.matches_category(label))
                })
                .map(|txn| txn.amount),
        )
        .ok_or(AggregateError::Overflow("budget spending"))
    }
}
