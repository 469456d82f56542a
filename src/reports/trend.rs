//! Six-month spending trend
//!
//! The dashboard shows one half of the calendar year at a time. Buckets are
//! keyed by month name only: an expense from May 2023 lands in the same
//! "May" bucket as one from May 2024.

use chrono::{Datelike, Month, NaiveDate};

use crate::models::{Expense, Money};

const FIRST_HALF: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const SECOND_HALF: [Month; 6] = [
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// January-June through June, July-December afterwards
pub fn six_month_window(today: NaiveDate) -> [Month; 6] {
    if today.month0() <= 5 {
        FIRST_HALF
    } else {
        SECOND_HALF
    }
}

/// One bucket of the trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub month: Month,
    pub total: Money,
}

impl TrendPoint {
    /// Three-letter label, e.g. "Jan"
    pub fn label(&self) -> &'static str {
        short_name(self.month)
    }
}

/// Sum amounts per requested month, ignoring the year
pub fn monthly_trend(expenses: &[Expense], months: &[Month]) -> Vec<TrendPoint> {
    months
        .iter()
        .map(|&month| TrendPoint {
            month,
            total: expenses
                .iter()
                .filter(|e| e.date.month() == month.number_from_month())
                .map(|e| e.amount)
                .sum(),
        })
        .collect()
}

pub fn short_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_halves() {
        assert_eq!(six_month_window(date(2024, 1, 15))[0], Month::January);
        assert_eq!(six_month_window(date(2024, 6, 30))[5], Month::June);
        assert_eq!(six_month_window(date(2024, 7, 1))[0], Month::July);
        assert_eq!(six_month_window(date(2024, 12, 31))[5], Month::December);
    }

    #[test]
    fn test_trend_ignores_year() {
        let expenses = vec![
            Expense::new("a", Category::Food, date(2023, 5, 2), Money::from_units(10)),
            Expense::new("b", Category::Food, date(2024, 5, 9), Money::from_units(20)),
            Expense::new("c", Category::Food, date(2024, 2, 1), Money::from_units(5)),
            Expense::new("d", Category::Food, date(2024, 8, 1), Money::from_units(99)),
        ];

        let trend = monthly_trend(&expenses, &six_month_window(date(2024, 3, 1)));
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[1].total, Money::from_units(5));
        assert_eq!(trend[4].label(), "May");
        assert_eq!(trend[4].total, Money::from_units(30));
        assert_eq!(trend[5].total, Money::zero());
    }

    #[test]
    fn test_trend_of_empty_snapshot() {
        let trend = monthly_trend(&[], &SECOND_HALF);
        assert!(trend.iter().all(|p| p.total.is_zero()));
    }
}
