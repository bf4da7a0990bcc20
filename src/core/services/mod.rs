pub mod budget_service;
pub mod feed_service;
pub mod goal_service;
pub mod report_service;
pub mod summary_service;

pub use budget_service::{BudgetService, BudgetStatus};
pub use feed_service::{FeedService, IssueKind, ParsedFeed, RecordIssue, TransactionFeed};
pub use goal_service::{GoalService, GoalStatus};
pub use report_service::{DashboardReport, ReportService};
pub use summary_service::{
    CategorySpending, DailyExpenseEntry, DailyExpenseSeries, ExpenseStatistics, MonthlyIncomeEntry,
    MonthlyIncomeSeries, PeriodSummary, SummaryService,
};
