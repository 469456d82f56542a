//! Service layer for Kharcha
//!
//! Derived views over the record collections: expense and trip filtering,
//! selection sets, and budget tracking.

pub mod budget;
pub mod filter;
pub mod selection;
pub mod trip;

pub use budget::{BudgetState, BudgetStatus};
pub use filter::{ExpenseFilter, SortOrder};
pub use selection::Selection;
pub use trip::{TripFilter, TripSortOrder};
