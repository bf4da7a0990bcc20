pub mod budget;
pub mod common;
pub mod goal;
pub mod money;
pub mod range;
pub mod transaction;

pub use budget::{Budget, BudgetCycle, BudgetHealth, BudgetProgress, NewBudget};
pub use common::{FromApiRecord, Identifiable};
pub use goal::{GoalDeposit, GoalUpdate, NewSavingGoal, SavingGoal};
pub use money::{Money, ParseMoneyError};
pub use range::{DateRange, MonthKey};
pub use transaction::{Direction, RawTransaction, Transaction};
