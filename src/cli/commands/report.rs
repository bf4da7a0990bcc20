use std::{
    fs,
    io::{self, Read},
};

use tracing::warn;

use crate::cli::core::{CliContext, CommandResult, ParsedArgs};
use crate::cli::{output, render};
use crate::core::services::{FeedService, ParsedFeed, ReportService, TransactionFeed};
use crate::currency::LocaleConfig;
use crate::domain::budget::Budget;
use crate::domain::common::FromApiRecord;
use crate::domain::goal::SavingGoal;
use crate::errors::{PurseError, Result};

use super::CommandDefinition;

const USAGE: &str = "report <transactions.json|-> [--goals <file>] [--budgets <file>] \
                     [--as-of YYYY-MM-DD] [--months N] [--days N] [--json]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "report",
        "Build the dashboard from exported API records",
        USAGE,
        cmd_report,
    )]
}

fn cmd_report(context: &mut CliContext, args: &[String]) -> CommandResult {
    let parsed = ParsedArgs::parse(
        args,
        &["--goals", "--budgets", "--as-of", "--months", "--days"],
        &["--json"],
    )?;
    let [path] = parsed.positionals.as_slice() else {
        return Err(PurseError::InvalidInput(format!("usage: {}", USAGE)));
    };

    let mut config = context.config.load()?;
    if let Some(months) = parsed.number("--months")? {
        config.months_back = months;
    }
    if let Some(days) = parsed.number("--days")? {
        config.days_back = days;
    }
    config.validate()?;
    let reference = context.reference_date(parsed.value("--as-of"))?;

    let feed: TransactionFeed = FeedService::parse_json(&read_input(path)?)?;
    let goals: Vec<SavingGoal> = match parsed.value("--goals") {
        Some(path) => load_records(path, "goal")?,
        None => Vec::new(),
    };
    let budgets: Vec<Budget> = match parsed.value("--budgets") {
        Some(path) => load_records(path, "budget")?,
        None => Vec::new(),
    };

    let report = ReportService::build(&feed, &goals, &budgets, reference, &config)?;
    if parsed.switch("--json") {
        output::raw(serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    let locale = LocaleConfig::for_tag(&config.locale);
    for (kind, line) in render::report_lines(&report, &locale) {
        output::print(kind, line);
    }
    Ok(())
}

fn load_records<T: FromApiRecord>(path: &str, label: &str) -> Result<Vec<T>> {
    let feed: ParsedFeed<T> = FeedService::parse_json(&read_input(path)?)?;
    for issue in &feed.issues {
        warn!(path, index = issue.index, kind = ?issue.kind, "{} record issue", label);
        output::warning(format!(
            "{} record #{} skipped: {}",
            label, issue.index, issue.message
        ));
    }
    Ok(feed.records)
}

/// Reads a file, or standard input for `-`.
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    fs::read_to_string(path).map_err(|err| {
        PurseError::InvalidInput(format!("cannot read `{}`: {}", path, err))
    })
}
