//! Expense model
//!
//! An expense is a single spending record. Records are created by appending
//! a fully-formed expense with a client-chosen id and later changed through
//! [`ExpenseUpdate`], a partial-field merge that never touches the id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Client-generated identifier, immutable after creation
    pub id: ExpenseId,

    /// Free-text description
    pub description: String,

    pub category: Category,

    pub date: NaiveDate,

    pub amount: Money,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self::with_id(ExpenseId::new(), description, category, date, amount)
    }

    /// Create an expense with a caller-chosen id
    pub fn with_id(
        id: impl Into<ExpenseId>,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category,
            date,
            amount,
        }
    }

    /// Display badge derived from the category
    pub fn badge(&self) -> &'static str {
        self.category.badge()
    }

    /// Entry-point validation
    ///
    /// The aggregation engine never calls this; it accepts whatever is stored.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::MissingDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Partial update applied to an existing expense
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.amount.is_none()
    }

    /// Merge the supplied fields into `expense`
    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
    }
}

/// Validation errors for expense entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingDescription,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescription => write!(f, "Description is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Please enter a valid amount (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
