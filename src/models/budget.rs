//! Monthly budget model
//!
//! A principal has at most one budget per calendar (year, month).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Budgeted amount for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub year: i32,

    /// Month number, 1-12
    pub month: u32,

    pub amount: Money,
}

impl MonthlyBudget {
    pub fn new(year: i32, month: u32, amount: Money) -> Self {
        Self {
            year,
            month,
            amount,
        }
    }

    /// Whether this budget covers the given (year, month)
    pub fn is_for(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }

    /// Whether `date` falls in this budget's month
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_for(date.year(), date.month())
    }

    /// Entry-point validation
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }

        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for MonthlyBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}: {}", self.year, self.month, self.amount)
    }
}

/// Validation errors for budget entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    InvalidMonth(u32),
    NonPositiveAmount(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "Month must be 1-12 (got {})", month),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive (got {})", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
