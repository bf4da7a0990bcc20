mod common;

use common::{cents, credit, date, debit, other};
use smartpurse_core::{
    core::services::{FeedService, SummaryService, TransactionFeed},
    errors::AggregateError,
    DateRange, Money, MonthKey,
};

#[test]
fn period_summary_ignores_input_order() {
    let mut txns = vec![
        credit(date(2025, 5, 1), 2_500_00),
        debit(date(2025, 5, 3), 12_35),
        debit(date(2025, 5, 9), 7_65),
        credit(date(2025, 5, 20), 40_00),
        other(date(2025, 5, 21), 99_00, "REFUND"),
    ];
    let range = DateRange::month_of(date(2025, 5, 1)).unwrap();
    let forward = SummaryService::summarize_period(&txns, range).unwrap();
    txns.reverse();
    let backward = SummaryService::summarize_period(&txns, range).unwrap();
    txns.rotate_left(2);
    let rotated = SummaryService::summarize_period(&txns, range).unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward, rotated);
    assert_eq!(forward.total_expenses, cents(20_00));
}

#[test]
fn summary_is_idempotent_and_leaves_input_untouched() {
    let txns = vec![credit(date(2025, 5, 1), 10_00), debit(date(2025, 5, 2), 3_00)];
    let snapshot = txns.clone();
    let range = DateRange::month_of(date(2025, 5, 1)).unwrap();
    let first = SummaryService::summarize_period(&txns, range).unwrap();
    let second = SummaryService::summarize_period(&txns, range).unwrap();
    assert_eq!(first, second);
    assert_eq!(txns, snapshot);
}

#[test]
fn fourteen_day_series_is_zero_filled() {
    let series = SummaryService::daily_expenses(&[], 14, date(2025, 5, 14)).unwrap();
    assert_eq!(series.len(), 14);
    assert!(series.values().all(|value| value == Money::ZERO));
    assert_eq!(series.entries.first().unwrap().date, date(2025, 5, 1));
    assert_eq!(series.entries.last().unwrap().date, date(2025, 5, 14));
}

#[test]
fn daily_series_excludes_days_outside_window() {
    let txns = vec![
        debit(date(2025, 4, 30), 5_00),
        debit(date(2025, 5, 1), 1_00),
        debit(date(2025, 5, 1), 2_00),
        credit(date(2025, 5, 2), 50_00),
        debit(date(2025, 5, 15), 9_00),
    ];
    let series = SummaryService::daily_expenses(&txns, 14, date(2025, 5, 14)).unwrap();
    assert_eq!(series.entries[0].total, cents(3_00));
    assert_eq!(series.entries[0].label, "1 May");
    assert_eq!(series.values().filter(|v| !v.is_zero()).count(), 1);
}

#[test]
fn statistics_average_over_full_window() {
    let txns = vec![
        debit(date(2025, 5, 2), 70_00),
        debit(date(2025, 5, 10), 14_00),
        debit(date(2025, 5, 10), 56_00),
    ];
    let series = SummaryService::daily_expenses(&txns, 14, date(2025, 5, 14)).unwrap();
    let stats = SummaryService::expense_statistics(&series).unwrap();
    let sum = Money::checked_sum(series.values()).unwrap();
    assert_eq!(stats.total, sum);
    assert_eq!(stats.total, cents(140_00));
    assert!((stats.average - 10.0).abs() < 1e-9);
    assert_eq!(stats.average_rounded(), cents(10_00));
    assert_eq!(stats.peak, cents(70_00));
    assert_eq!(stats.days, 14);
}

#[test]
fn savings_rate_edges() {
    assert_eq!(SummaryService::savings_rate(Money::ZERO, cents(500_00)), 0.0);
    assert_eq!(
        SummaryService::savings_rate(cents(1_000_00), cents(1_500_00)),
        150.0
    );
}

#[test]
fn unknown_direction_counts_nowhere() {
    let feed: TransactionFeed = FeedService::parse_json(
        r#"[
            {"transaction_date": "2025-05-02", "amount": "100.00", "trans_type": "CREDIT"},
            {"transaction_date": "2025-05-03", "amount": "40.00", "trans_type": "DEBIT"},
            {"transaction_date": "2025-05-04", "amount": "25.00", "trans_type": "REFUND"}
        ]"#,
    )
    .unwrap();
    assert_eq!(feed.records.len(), 3);
    let range = DateRange::month_of(date(2025, 5, 1)).unwrap();
    let summary = SummaryService::summarize_period(&feed.records, range).unwrap();
    assert_eq!(summary.total_income, cents(100_00));
    assert_eq!(summary.total_expenses, cents(40_00));
    assert_eq!(summary.balance, cents(60_00));
    assert_eq!(feed.issues.len(), 1);
    assert!(!feed.issues[0].excluded);
}

#[test]
fn may_2025_end_to_end() {
    let feed: TransactionFeed = FeedService::parse_json(common::MAY_FEED).unwrap();
    let range = DateRange::new(date(2025, 5, 1), date(2025, 5, 31)).unwrap();
    let summary = SummaryService::summarize_period(&feed.records, range).unwrap();
    assert_eq!(summary.total_income.to_string(), "2500.00");
    assert_eq!(summary.total_expenses.to_string(), "80.00");
    assert_eq!(summary.balance.to_string(), "2420.00");
}

#[test]
fn monthly_income_orders_across_year_boundary() {
    let txns = vec![
        credit(date(2025, 1, 5), 300_00),
        credit(date(2024, 12, 20), 200_00),
        credit(date(2024, 12, 31), 50_00),
    ];
    let series = SummaryService::monthly_income(&txns, 2, date(2025, 1, 31)).unwrap();
    assert_eq!(series.entries.len(), 2);
    assert_eq!(series.entries[0].key, MonthKey { year: 2024, month: 12 });
    assert_eq!(series.entries[0].label, "Dec");
    assert_eq!(series.entries[0].total, cents(250_00));
    assert_eq!(series.entries[1].label, "Jan");
    assert_eq!(series.window.start, date(2024, 11, 1));
}

#[test]
fn inverted_range_is_rejected() {
    assert!(DateRange::new(date(2025, 5, 2), date(2025, 5, 1)).is_err());
}

#[test]
fn windows_beyond_the_calendar_fail_fast() {
    let reference = date(2025, 5, 14);
    let daily = SummaryService::daily_expenses(&[], u32::MAX, reference).unwrap_err();
    assert!(matches!(daily, AggregateError::InvalidWindow(_)));
    let monthly = SummaryService::monthly_income(&[], u32::MAX, reference).unwrap_err();
    assert!(matches!(monthly, AggregateError::InvalidWindow(_)));
}
