//! Text layout of a dashboard report.

use crate::cli::output::MessageKind;
use crate::core::services::DashboardReport;
use crate::currency::{format_date, format_default, format_percent, CurrencyCode, LocaleConfig};
use crate::domain::budget::BudgetHealth;
use crate::domain::money::Money;

pub type Line = (MessageKind, String);

#[derive(Default)]
struct Lines(Vec<Line>);

impl Lines {
    fn section(&mut self, title: impl Into<String>) {
        self.0.push((MessageKind::Section, title.into()));
    }

    fn info(&mut self, text: String) {
        self.0.push((MessageKind::Info, text));
    }

    fn push(&mut self, kind: MessageKind, text: String) {
        self.0.push((kind, text));
    }
}

pub fn report_lines(report: &DashboardReport, locale: &LocaleConfig) -> Vec<Line> {
    let code = CurrencyCode::new(&report.currency);
    let money = |amount: Money| format_default(amount, &code, locale);
    let mut lines = Lines::default();

    lines.section(format!("Dashboard for {}", format_date(locale, report.reference)));
    lines.info(format!("  Current balance : {}", money(report.balance_to_date)));

    let month = &report.current_month;
    lines.section(format!("This month ({})", month.range));
    lines.info(format!("  Income   : {}", money(month.total_income)));
    lines.info(format!("  Expenses : {}", money(month.total_expenses)));
    lines.info(format!("  Balance  : {}", money(month.balance)));

    if !report.spending_by_category.is_empty() {
        lines.section("Spending by category");
    }
    for entry in &report.spending_by_category {
        lines.info(format!(
            "  {} : {} ({})",
            entry.category,
            money(entry.total),
            format_percent(entry.share * 100.0)
        ));
    }

    lines.section("Monthly income");
    if report.monthly_income.entries.is_empty() {
        lines.info("  No income in this window.".to_string());
    }
    for entry in &report.monthly_income.entries {
        lines.info(format!("  {} {} : {}", entry.label, entry.key.year, money(entry.total)));
    }

    lines.section(format!("Daily expenses (last {} days)", report.daily_expenses.len()));
    for entry in &report.daily_expenses.entries {
        lines.info(format!("  {:>6} : {}", entry.label, money(entry.total)));
    }
    let stats = &report.expense_statistics;
    lines.info(format!("  Total    : {}", money(stats.total)));
    lines.info(format!("  Average  : {}", money(stats.average_rounded())));
    lines.info(format!("  Peak     : {}", money(stats.peak)));

    lines.section("Savings");
    lines.info(format!("  Total saved  : {}", money(report.total_saved)));
    lines.info(format!("  Savings rate : {}", format_percent(report.savings_rate)));
    for goal in &report.goals {
        let kind = if goal.reached {
            MessageKind::Success
        } else {
            MessageKind::Info
        };
        let timing = if goal.days_left < 0 {
            format!("{} days overdue", -goal.days_left)
        } else {
            format!("{} days left", goal.days_left)
        };
        lines.push(
            kind,
            format!(
                "  {} : {} of {} ({}), {}",
                goal.name,
                money(goal.current),
                money(goal.target),
                format_percent(goal.progress * 100.0),
                timing
            ),
        );
    }

    if !report.budgets.is_empty() {
        lines.section("Budgets");
        lines.info(format!("  Monthly budget : {}", money(report.monthly_budget)));
    }
    for budget in &report.budgets {
        let progress = &budget.progress;
        let kind = match progress.health {
            BudgetHealth::OnTrack => MessageKind::Info,
            BudgetHealth::Warning => MessageKind::Warning,
            BudgetHealth::Critical => MessageKind::Error,
        };
        lines.push(
            kind,
            format!(
                "  {} ({}) : {} of {}, {} left",
                budget.category,
                budget.cycle,
                money(progress.spent),
                money(progress.allocated),
                money(progress.remaining)
            ),
        );
    }

    for issue in &report.issues {
        let id = issue
            .id
            .as_deref()
            .map(|id| format!(" (id {})", id))
            .unwrap_or_default();
        let action = if issue.excluded { "skipped" } else { "not counted" };
        lines.push(
            MessageKind::Warning,
            format!("record #{}{} {}: {}", issue.index, id, action, issue.message),
        );
    }
    lines.0
}
