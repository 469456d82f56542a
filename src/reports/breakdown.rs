//! Calendar breakdowns for the report views
//!
//! Unlike the dashboard trend, these are year-aware.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{Expense, Money};

/// Total and count for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub count: usize,
}

impl MonthTotal {
    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Total and count for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: Money,
    pub count: usize,
}

/// Totals per calendar month, oldest first
pub fn monthly_breakdown(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut buckets: BTreeMap<(i32, u32), (Money, usize)> = BTreeMap::new();

    for expense in expenses {
        let entry = buckets
            .entry((expense.date.year(), expense.date.month()))
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (total, count))| MonthTotal {
            year,
            month,
            total,
            count,
        })
        .collect()
}

/// Totals per day within one month, earliest first
pub fn daily_breakdown(expenses: &[Expense], year: i32, month: u32) -> Vec<DayTotal> {
    let mut buckets: BTreeMap<NaiveDate, (Money, usize)> = BTreeMap::new();

    for expense in expenses.iter().filter(|e| in_month(e, year, month)) {
        let entry = buckets.entry(expense.date).or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (total, count))| DayTotal { date, total, count })
        .collect()
}

/// Expenses dated in the given month, newest first
pub fn expenses_in_month(expenses: &[Expense], year: i32, month: u32) -> Vec<Expense> {
    let mut matching: Vec<Expense> = expenses
        .iter()
        .filter(|e| in_month(e, year, month))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

pub(crate) fn in_month(expense: &Expense, year: i32, month: u32) -> bool {
    expense.date.year() == year && expense.date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn expense(y: i32, m: u32, d: u32, units: i64) -> Expense {
        Expense::new(
            "x",
            Category::Other,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_units(units),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(2024, 5, 3, 10),
            expense(2023, 5, 3, 7),
            expense(2024, 5, 3, 5),
            expense(2024, 4, 30, 2),
            expense(2024, 5, 21, 1),
        ]
    }

    #[test]
    fn test_monthly_breakdown_is_year_aware() {
        let months = monthly_breakdown(&sample());
        let keys: Vec<String> = months.iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["2023-05", "2024-04", "2024-05"]);
        assert_eq!(months[2].total, Money::from_units(16));
        assert_eq!(months[2].count, 3);
    }

    #[test]
    fn test_daily_breakdown() {
        let days = daily_breakdown(&sample(), 2024, 5);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.day(), 3);
        assert_eq!(days[0].total, Money::from_units(15));
        assert_eq!(days[0].count, 2);
        assert_eq!(days[1].date.day(), 21);
    }

    #[test]
    fn test_expenses_in_month_newest_first() {
        let may = expenses_in_month(&sample(), 2024, 5);
        assert_eq!(may.len(), 3);
        assert_eq!(may[0].date.day(), 21);
        assert!(expenses_in_month(&sample(), 2022, 1).is_empty());
    }
}
