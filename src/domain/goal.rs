use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::{opaque_id, parse_amount, parse_api_date, FromApiRecord, Identifiable};
use crate::domain::money::Money;
use crate::errors::RecordError;

/// Deadline format the goals endpoint expects.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d 00:00:00";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSavingGoal {
    #[serde(default, alias = "id")]
    pub goal_id: Option<Value>,
    #[serde(default)]
    pub client_id: Option<Value>,
    #[serde(default)]
    pub goal_name: Option<String>,
    #[serde(default)]
    pub current_amount: Option<Value>,
    #[serde(default)]
    pub target_amount: Option<Value>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// A savings goal with its progress inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: Option<String>,
    pub client_id: Option<String>,
    pub name: String,
    pub current: Money,
    pub target: Money,
    pub deadline: NaiveDate,
}

impl SavingGoal {
    pub fn new(name: impl Into<String>, current: Money, target: Money, deadline: NaiveDate) -> Self {
        Self {
            id: None,
            client_id: None,
            name: name.into(),
            current,
            target,
            deadline,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Fraction of the target reached, capped at 1.0. Zero for a non-positive target.
    pub fn progress(&self) -> f64 {
        self.current
            .ratio_of(self.target)
            .map(|ratio| ratio.clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Amount still to save; zero once the target is reached.
    pub fn remaining(&self) -> Money {
        self.target
            .checked_sub(self.current)
            .filter(|left| left.is_positive())
            .unwrap_or(Money::ZERO)
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }

    /// Whole days until the deadline; negative once it has passed.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

impl Identifiable for SavingGoal {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl FromApiRecord for SavingGoal {
    type Raw = RawSavingGoal;

    fn raw_id(raw: &RawSavingGoal) -> Option<String> {
        opaque_id(raw.goal_id.as_ref())
    }

    fn from_raw(raw: RawSavingGoal) -> Result<Self, RecordError> {
        let name = raw
            .goal_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(RecordError::MissingField("goal_name"))?;
        let current = parse_amount("current_amount", raw.current_amount.as_ref())?;
        let target = parse_amount("target_amount", raw.target_amount.as_ref())?;
        let deadline = raw
            .deadline
            .as_deref()
            .ok_or(RecordError::MissingField("deadline"))
            .and_then(parse_api_date)?;
        Ok(Self {
            id: opaque_id(raw.goal_id.as_ref()),
            client_id: opaque_id(raw.client_id.as_ref()),
            name,
            current,
            target,
            deadline,
        })
    }
}

/// Body of the create-goal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSavingGoal {
    pub client_id: String,
    pub goal_name: String,
    pub current_amount: String,
    pub target_amount: String,
    pub deadline: String,
}

/// Result of a deposit into a goal, before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalDeposit {
    pub goal_id: Option<String>,
    pub deposited: Money,
    pub previous_total: Money,
    pub new_total: Money,
}

/// Body of the goal update (PUT) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalUpdate {
    pub current_amount: String,
}

impl GoalDeposit {
    pub fn update_request(&self) -> GoalUpdate {
        GoalUpdate {
            current_amount: self.new_total.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn goal(current: i64, target: i64) -> SavingGoal {
        SavingGoal::new(
            "Emergency Fund",
            Money::from_minor(current),
            Money::from_minor(target),
            NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
        )
    }

    #[test]
    fn progress_is_capped_and_safe() {
        assert!((goal(150_000, 500_000).progress() - 0.3).abs() < 1e-9);
        assert_eq!(goal(700_000, 500_000).progress(), 1.0);
        assert_eq!(goal(100, 0).progress(), 0.0);
    }

    #[test]
    fn remaining_floors_at_zero() {
        assert_eq!(goal(40_000, 120_000).remaining(), Money::from_minor(80_000));
        assert_eq!(goal(130_000, 120_000).remaining(), Money::ZERO);
        assert!(goal(120_000, 120_000).is_reached());
    }

    #[test]
    fn parses_api_goal_with_midnight_deadline() {
        let raw: RawSavingGoal = serde_json::from_value(json!({
            "goal_id": 3,
            "client_id": "24021055",
            "goal_name": "New Laptop",
            "current_amount": "400.00",
            "target_amount": "1200.00",
            "deadline": "2025-08-14 00:00:00"
        }))
        .unwrap();
        let goal = SavingGoal::from_raw(raw).unwrap();
        assert_eq!(goal.id.as_deref(), Some("3"));
        assert_eq!(goal.client_id.as_deref(), Some("24021055"));
        assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2025, 8, 14).unwrap());
        assert_eq!(goal.target, Money::from_minor(120_000));
    }

    #[test]
    fn deposit_update_uses_two_decimals() {
        let deposit = GoalDeposit {
            goal_id: Some("3".into()),
            deposited: Money::from_minor(5_000),
            previous_total: Money::from_minor(40_000),
            new_total: Money::from_minor(45_000),
        };
        assert_eq!(deposit.update_request().current_amount, "450.00");
    }
}
