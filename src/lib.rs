#![doc(test(attr(deny(warnings))))]

//! SmartPurse Core derives the dashboard figures of a personal-finance app
//! from the raw transaction, goal and budget records its API returns.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod utils;

pub use crate::config::{ConfigManager, ReportConfig};
pub use crate::core::services::{
    BudgetService, DashboardReport, FeedService, GoalService, ReportService, SummaryService,
};
pub use crate::core::{Clock, SystemClock};
pub use crate::domain::{DateRange, Direction, Money, MonthKey, Transaction};
pub use crate::errors::{PurseError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(build = %build.summary(), "SmartPurse core initialized");
    });
}
