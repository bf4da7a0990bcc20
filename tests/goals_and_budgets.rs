mod common;

use common::{cents, date, debit, BUDGETS, GOALS};
use smartpurse_core::{
    core::services::{BudgetService, GoalService},
    domain::budget::{BudgetCycle, BudgetHealth},
    errors::ValidationError,
};

#[test]
fn goals_parse_both_deadline_shapes() {
    let feed = GoalService::parse_json(GOALS).unwrap();
    assert!(feed.issues.is_empty());
    assert_eq!(feed.records[0].deadline, date(2025, 11, 14));
    assert_eq!(feed.records[1].deadline, date(2025, 8, 14));
    assert_eq!(feed.records[0].client_id.as_deref(), Some("24021055"));
    assert_eq!(
        GoalService::total_saved(&feed.records).unwrap(),
        cents(1_700_00)
    );
}

#[test]
fn goal_statuses_reflect_progress() {
    let feed = GoalService::parse_json(GOALS).unwrap();
    let statuses = GoalService::statuses(&feed.records, date(2025, 5, 14));
    assert!((statuses[0].progress - 0.1).abs() < 1e-9);
    assert_eq!(statuses[0].remaining, cents(4_500_00));
    assert!(!statuses[0].reached);
    assert!(statuses[1].reached);
    assert_eq!(statuses[1].remaining, cents(0));
    assert_eq!(statuses[1].progress, 1.0);
}

#[test]
fn deposit_into_a_found_goal() {
    let feed = GoalService::parse_json(GOALS).unwrap();
    let goal = feed.find("1").unwrap();
    let deposit = GoalService::deposit(goal, cents(250_00)).unwrap();
    assert_eq!(deposit.new_total, cents(750_00));
    let body = serde_json::to_value(deposit.update_request()).unwrap();
    assert_eq!(body, serde_json::json!({"current_amount": "750.00"}));
}

#[test]
fn create_goal_rejects_past_deadline() {
    let err = GoalService::new_goal(
        "24021055",
        "Trip",
        cents(900_00),
        date(2025, 5, 1),
        date(2025, 5, 14),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::DeadlineInPast { .. }));
}

#[test]
fn unknown_budget_cycle_is_reported() {
    let feed = BudgetService::parse_json(
        r#"[{"budget_id": 3, "category": "Fun", "amount": "10.00", "cycle": "fortnightly"}]"#,
    )
    .unwrap();
    assert!(feed.records.is_empty());
    assert_eq!(feed.issues.len(), 1);
    assert!(feed.issues[0].message.contains("fortnightly"));
}

#[test]
fn budget_health_tracks_spending() {
    let feed = BudgetService::parse_json(BUDGETS).unwrap();
    assert_eq!(feed.records[1].cycle, BudgetCycle::Weekly);
    assert_eq!(feed.records[1].allocated, cents(150_00));

    let txns = vec![
        debit(date(2025, 5, 3), 75_00).with_category("food"),
        debit(date(2025, 5, 14), 20_00).with_category("Food"),
        debit(date(2025, 5, 13), 30_00).with_category("Transport"),
        debit(date(2025, 5, 11), 99_00).with_category("Transport"),
    ];
    let statuses = BudgetService::statuses(&feed.records, &txns, date(2025, 5, 14)).unwrap();

    let food = &statuses[0].progress;
    assert_eq!(food.spent, cents(95_00));
    assert_eq!(food.remaining, cents(5_00));
    assert_eq!(food.health, BudgetHealth::Critical);

    // Week of Monday 12 May; the 11th belongs to the previous week.
    let transport = &statuses[1];
    assert_eq!(transport.window.start, date(2025, 5, 12));
    assert_eq!(transport.progress.spent, cents(30_00));
    assert_eq!(transport.progress.health, BudgetHealth::OnTrack);
}

#[test]
fn overspent_budget_goes_negative() {
    let budget = smartpurse_core::domain::budget::Budget::new(
        "Food",
        cents(50_00),
        BudgetCycle::Daily,
    );
    let txns = vec![debit(date(2025, 5, 14), 80_00).with_category("Food")];
    let status = BudgetService::status(&budget, &txns, date(2025, 5, 14)).unwrap();
    assert!(status.progress.is_overspent());
    assert_eq!(status.progress.remaining, cents(-30_00));
    assert_eq!(status.progress.progress, 1.0);
}
