//! One-shot dashboard assembly for a reference date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ReportConfig;
use crate::core::services::budget_service::{BudgetService, BudgetStatus};
use crate::core::services::feed_service::{RecordIssue, TransactionFeed};
use crate::core::services::goal_service::{GoalService, GoalStatus};
use crate::core::services::summary_service::{
    CategorySpending, DailyExpenseSeries, ExpenseStatistics, MonthlyIncomeSeries, PeriodSummary, SummaryService,
};
use crate::domain::budget::{Budget, BudgetCycle};
use crate::domain::goal::SavingGoal;
use crate::domain::money::Money;
use crate::domain::range::DateRange;
use crate::domain::transaction::Transaction;
use crate::errors::{AggregateError, AggregateResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub reference: NaiveDate,
    pub currency: String,
    /// Net of every counted transaction dated on or before the reference date.
    pub balance_to_date: Money,
    pub current_month: PeriodSummary,
    /// This month's expenses per category.
    pub spending_by_category: Vec<CategorySpending>,
    pub monthly_income: MonthlyIncomeSeries,
    pub daily_expenses: DailyExpenseSeries,
    pub expense_statistics: ExpenseStatistics,
    pub total_saved: Money,
    /// Total saved relative to this month's income, in percent.
    pub savings_rate: f64,
    pub goals: Vec<GoalStatus>,
    /// Sum of the allocations of every monthly budget.
    pub monthly_budget: Money,
    pub budgets: Vec<BudgetStatus>,
    pub issues: Vec<RecordIssue>,
}

pub struct ReportService;

impl ReportService {
    pub fn build(
        feed: &TransactionFeed,
        goals: &[SavingGoal],
        budgets: &[Budget],
        reference: NaiveDate,
        config: &ReportConfig,
    ) -> AggregateResult<DashboardReport> {
        let transactions = feed.records.as_slice();

        let month = DateRange::month_of(reference)?;
        let current_month = SummaryService::summarize_period(transactions, month)?;
        let spending_by_category = SummaryService::spending_by_category(transactions, month)?;
        let monthly_income =
            SummaryService::monthly_income(transactions, config.months_back, reference)?;
        let daily_expenses =
            SummaryService::daily_expenses(transactions, config.days_back, reference)?;
        let expense_statistics = SummaryService::expense_statistics(&daily_expenses)?;
        let total_saved = GoalService::total_saved(goals)?;
        let savings_rate = SummaryService::savings_rate(current_month.total_income, total_saved);

        let report = DashboardReport {
            reference,
            currency: config.currency.clone(),
            balance_to_date: Self::balance_to_date(transactions, reference)?,
            current_month,
            spending_by_category,
            monthly_income,
            daily_expenses,
            expense_statistics,
            total_saved,
            savings_rate,
            goals: GoalService::statuses(goals, reference),
            monthly_budget: BudgetService::total_allocated(budgets, BudgetCycle::Monthly)?,
            budgets: BudgetService::statuses(budgets, transactions, reference)?,
            issues: feed.issues.clone(),
        };
        info!(
            %reference,
            transactions = transactions.len(),
            issues = report.issues.len(),
            "dashboard report built"
        );
        Ok(report)
    }

    fn balance_to_date(transactions: &[Transaction], reference: NaiveDate) -> AggregateResult<Money> {
        Money::checked_sum(
            transactions
                .iter()
                .filter(|txn| txn.date <= reference)
                .filter_map(Transaction::signed_amount),
        )
        .ok_or(AggregateError::Overflow("balance to date"))
    }
}
