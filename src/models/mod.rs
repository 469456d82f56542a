//! Core data models for Kharcha
//!
//! Expenses, trips and monthly budgets, plus the value types they are built
//! from (ids, money, categories, principals).

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod principal;
pub mod trip;

pub use budget::{BudgetValidationError, MonthlyBudget};
pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError};
pub use ids::{ExpenseId, TripId};
pub use money::{Money, MoneyParseError};
pub use principal::Principal;
pub use trip::{Trip, TripUpdate, TripValidationError};
