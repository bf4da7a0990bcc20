//! Savings goal progress, deposits and create-goal payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::services::feed_service::{FeedService, ParsedFeed};
use crate::domain::goal::{GoalDeposit, NewSavingGoal, SavingGoal, DEADLINE_FORMAT};
use crate::domain::money::Money;
use crate::errors::{AggregateError, AggregateResult, FeedError, ValidationError};

/// Display-ready progress of one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub current: Money,
    pub target: Money,
    pub progress: f64,
    pub remaining: Money,
    pub reached: bool,
    pub deadline: NaiveDate,
    pub days_left: i64,
}

pub struct GoalService;

impl GoalService {
    pub fn parse_json(text: &str) -> Result<ParsedFeed<SavingGoal>, FeedError> {
        FeedService::parse_json(text)
    }

    /// Sum of the amounts already saved across goals.
    pub fn total_saved(goals: &[SavingGoal]) -> AggregateResult<Money> {
        Money::checked_sum(goals.iter().map(|goal| goal.current))
            .ok_or(AggregateError::Overflow("total saved"))
    }

    pub fn status(goal: &SavingGoal, today: NaiveDate) -> GoalStatus {
        GoalStatus {
            id: goal.id.clone(),
            name: goal.name.clone(),
            current: goal.current,
            target: goal.target,
            progress: goal.progress(),
            remaining: goal.remaining(),
            reached: goal.is_reached(),
            deadline: goal.deadline,
            days_left: goal.days_left(today),
        }
    }

    pub fn statuses(goals: &[SavingGoal], today: NaiveDate) -> Vec<GoalStatus> {
        goals.iter().map(|goal| Self::status(goal, today)).collect()
    }

    /// Adds `amount` to the goal's saved total.
    pub fn deposit(goal: &SavingGoal, amount: Money) -> Result<GoalDeposit, ValidationError> {
        if !amount.is_positive() {
            return Err(ValidationError::NotPositive("deposit amount"));
        }
        let new_total = goal
            .current
            .checked_add(amount)
            .ok_or(ValidationError::Overflow("deposit total"))?;
        info!(goal = %goal.name, %amount, %new_total, "prepared goal deposit");
        Ok(GoalDeposit {
            goal_id: goal.id.clone(),
            deposited: amount,
            previous_total: goal.current,
            new_total,
        })
    }

    /// Builds the create-goal request. New goals always start at zero saved.
    pub fn new_goal(
        client_id: &str,
        name: &str,
        target: Money,
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> Result<NewSavingGoal, ValidationError> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(ValidationError::Blank("client id"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Blank("goal name"));
        }
        if !target.is_positive() {
            return Err(ValidationError::NotPositive("target amount"));
        }
        if deadline < today {
            return Err(ValidationError::DeadlineInPast { deadline, today });
        }
        Ok(NewSavingGoal {
            client_id: client_id.to_string(),
            goal_name: name.to_string(),
            current_amount: Money::ZERO.to_string(),
            target_amount: target.to_string(),
            deadline: deadline.format(DEADLINE_FORMAT).to_string(),
        })
    }
}
