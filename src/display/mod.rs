//! Display formatting for terminal output

pub mod budget;
pub mod expense;
pub mod report;
pub mod trip;

pub use budget::format_budget_status;
pub use expense::{format_expense_details, format_expense_list, format_expense_row};
pub use trip::{format_trip_details, format_trip_list};
