//! Monthly budget tracking
//!
//! Budgets are a flat list with at most one entry per (year, month). Status
//! compares the budget against the spending of exactly that month.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{Expense, Money, MonthlyBudget};
use crate::reports::aggregate::total_spending;
use crate::reports::breakdown::expenses_in_month;

/// Overwrite the budget for (year, month) in place, or append a new one
///
/// Returns the amount that was replaced, if any.
pub fn set_budget(
    budgets: &mut Vec<MonthlyBudget>,
    year: i32,
    month: u32,
    amount: Money,
) -> Option<Money> {
    match budgets.iter_mut().find(|b| b.is_for(year, month)) {
        Some(existing) => Some(std::mem::replace(&mut existing.amount, amount)),
        None => {
            budgets.push(MonthlyBudget::new(year, month, amount));
            None
        }
    }
}

/// Budget amount for (year, month), if one was set
pub fn budget_for(budgets: &[MonthlyBudget], year: i32, month: u32) -> Option<Money> {
    budgets
        .iter()
        .find(|b| b.is_for(year, month))
        .map(|b| b.amount)
}

pub fn current_month_budget(budgets: &[MonthlyBudget], today: NaiveDate) -> Option<Money> {
    budget_for(budgets, today.year(), today.month())
}

/// Spending dated in (year, month)
pub fn spent_in_month(expenses: &[Expense], year: i32, month: u32) -> Money {
    total_spending(&expenses_in_month(expenses, year, month))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    NoBudgetSet,
    /// Spent at most 100% of the budget
    OnTrack,
    OverBudget,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBudgetSet => write!(f, "No budget set"),
            Self::OnTrack => write!(f, "On track"),
            Self::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Budget-versus-actual for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub year: i32,
    pub month: u32,
    pub budget: Option<Money>,
    pub spent: Money,
    /// `budget - spent`; negative when overspent, `None` without a budget
    pub remaining: Option<Money>,
    /// `spent / budget * 100`, or 0 without a budget
    pub percentage: f64,
    pub state: BudgetState,
}

impl BudgetStatus {
    pub fn compute(budgets: &[MonthlyBudget], expenses: &[Expense], year: i32, month: u32) -> Self {
        let spent = spent_in_month(expenses, year, month);

        match budget_for(budgets, year, month) {
            Some(budget) => {
                let percentage = spent.percent_of(budget);
                let state = if percentage > 100.0 {
                    BudgetState::OverBudget
                } else {
                    BudgetState::OnTrack
                };
                Self {
                    year,
                    month,
                    budget: Some(budget),
                    spent,
                    remaining: Some(budget - spent),
                    percentage,
                    state,
                }
            }
            None => Self {
                year,
                month,
                budget: None,
                spent,
                remaining: None,
                percentage: 0.0,
                state: BudgetState::NoBudgetSet,
            },
        }
    }

    pub fn for_today(budgets: &[MonthlyBudget], expenses: &[Expense], today: NaiveDate) -> Self {
        Self::compute(budgets, expenses, today.year(), today.month())
    }

    pub fn is_over_budget(&self) -> bool {
        self.state == BudgetState::OverBudget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(on: NaiveDate, units: i64) -> Expense {
        Expense::new("x", Category::Food, on, Money::from_units(units))
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut budgets = Vec::new();
        assert_eq!(set_budget(&mut budgets, 2024, 5, Money::from_units(500)), None);
        assert_eq!(budget_for(&budgets, 2024, 5), Some(Money::from_units(500)));

        assert_eq!(
            set_budget(&mut budgets, 2024, 5, Money::from_units(700)),
            Some(Money::from_units(500))
        );
        assert_eq!(budgets.len(), 1);
        assert_eq!(budget_for(&budgets, 2024, 5), Some(Money::from_units(700)));

        set_budget(&mut budgets, 2024, 6, Money::from_units(100));
        assert_eq!(budgets.len(), 2);
        assert_eq!(budget_for(&budgets, 2023, 5), None);
    }

    #[test]
    fn test_over_budget() {
        let budgets = vec![MonthlyBudget::new(2024, 5, Money::from_units(1000))];
        let expenses = vec![
            expense(date(2024, 5, 2), 700),
            expense(date(2024, 5, 28), 500),
            expense(date(2024, 6, 1), 10_000),
            expense(date(2023, 5, 2), 10_000),
        ];

        let status = BudgetStatus::compute(&budgets, &expenses, 2024, 5);
        assert_eq!(status.spent, Money::from_units(1200));
        assert_eq!(status.remaining, Some(Money::from_units(-200)));
        assert!((status.percentage - 120.0).abs() < 1e-9);
        assert_eq!(status.state, BudgetState::OverBudget);
        assert!(status.is_over_budget());
    }

    #[test]
    fn test_exactly_at_budget_is_on_track() {
        let budgets = vec![MonthlyBudget::new(2024, 5, Money::from_units(100))];
        let expenses = vec![expense(date(2024, 5, 2), 100)];
        let status = BudgetStatus::compute(&budgets, &expenses, 2024, 5);
        assert_eq!(status.state, BudgetState::OnTrack);
        assert_eq!(status.remaining, Some(Money::zero()));
    }

    #[test]
    fn test_no_budget_set() {
        let expenses = vec![expense(date(2024, 5, 2), 100)];
        let status = BudgetStatus::compute(&[], &expenses, 2024, 5);
        assert_eq!(status.state, BudgetState::NoBudgetSet);
        assert_eq!(status.remaining, None);
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.spent, Money::from_units(100));
    }

    #[test]
    fn test_for_today() {
        let budgets = vec![MonthlyBudget::new(2024, 5, Money::from_units(50))];
        let today = date(2024, 5, 15);
        assert_eq!(current_month_budget(&budgets, today), Some(Money::from_units(50)));

        let status = BudgetStatus::for_today(&budgets, &[], today);
        assert_eq!(status.state, BudgetState::OnTrack);
        assert_eq!((status.year, status.month), (2024, 5));
    }
}
