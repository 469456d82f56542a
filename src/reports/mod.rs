//! Reports module for Kharcha
//!
//! Aggregations over expense snapshots: headline totals, category
//! breakdowns, the dashboard trend, and calendar breakdowns.

pub mod aggregate;
pub mod breakdown;
pub mod spending;
pub mod trend;

pub use aggregate::{
    biggest_category, biggest_category_label, category_spending, category_totals,
    monthly_average, total_spending, CategoryTotal,
};
pub use breakdown::{daily_breakdown, expenses_in_month, monthly_breakdown, DayTotal, MonthTotal};
pub use spending::{FilteredSummary, SpendingSummary};
pub use trend::{monthly_trend, six_month_window, TrendPoint};
