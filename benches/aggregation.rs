use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smartpurse_core::{
    config::ReportConfig,
    core::services::{FeedService, ReportService, SummaryService, TransactionFeed},
    DateRange,
};

fn build_feed_json(txn_count: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records: Vec<serde_json::Value> = (0..txn_count)
        .map(|idx| {
            let date = start + Duration::days((idx % 500) as i64);
            let kind = if idx % 5 == 0 { "CREDIT" } else { "DEBIT" };
            serde_json::json!({
                "transaction_id": idx,
                "transaction_date": date.format("%Y-%m-%d").to_string(),
                "amount": format!("{}.{:02}", 10 + idx % 400, idx % 100),
                "trans_type": kind,
                "category": if idx % 2 == 0 { "Food" } else { "Transport" },
            })
        })
        .collect();
    serde_json::to_string(&records).unwrap()
}

fn bench_aggregation(c: &mut Criterion) {
    let json = build_feed_json(black_box(50_000));
    let reference = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();

    c.bench_function("parse_feed_50k", |b| {
        b.iter(|| {
            let feed: TransactionFeed = FeedService::parse_json(&json).expect("parse feed");
            black_box(feed);
        })
    });

    let feed: TransactionFeed = FeedService::parse_json(&json).expect("seed feed");
    let month = DateRange::month_of(reference).expect("month range");

    c.bench_function("summarize_month_50k", |b| {
        b.iter(|| SummaryService::summarize_period(black_box(&feed.records), month))
    });

    c.bench_function("daily_expenses_14d_50k", |b| {
        b.iter(|| SummaryService::daily_expenses(black_box(&feed.records), 14, reference))
    });

    let config = ReportConfig::default();
    c.bench_function("dashboard_report_50k", |b| {
        b.iter(|| ReportService::build(black_box(&feed), &[], &[], reference, &config))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
