//! CLI command handlers
//!
//! Bridges clap argument parsing with the [`Session`]. Entry-point
//! validation happens here, before anything reaches the core.

pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod report;
pub mod trip;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};
pub use trip::{handle_trip_command, TripCommands};
pub use user::{handle_user_command, UserCommands};

use chrono::{Local, NaiveDate};

use crate::error::{KharchaError, KharchaResult};
use crate::models::{Category, Money, Principal, UnknownCategory};
use crate::session::Session;

/// Fail with a hint when no user is selected
pub(crate) fn require_user(session: &Session) -> KharchaResult<Principal> {
    session.principal().cloned().ok_or_else(|| {
        KharchaError::Config(
            "No user selected. Pass --user <email>, set KHARCHA_USER, or run 'kharcha user switch <email>'"
                .into(),
        )
    })
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(s: &str) -> KharchaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| KharchaError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s)))
}

pub(crate) fn parse_optional_date(s: Option<&str>) -> KharchaResult<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

pub(crate) fn parse_amount(s: &str) -> KharchaResult<Money> {
    Money::parse(s).map_err(|e| KharchaError::Validation(e.to_string()))
}

pub(crate) fn parse_category(s: &str) -> KharchaResult<Category> {
    s.parse()
        .map_err(|e: UnknownCategory| KharchaError::Validation(e.to_string()))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
