//! Spending summaries
//!
//! [`SpendingSummary`] is the dashboard: headline totals, per-category
//! spending, the six-month trend and this month's budget. [`FilteredSummary`]
//! describes whatever view the filter pipeline produced.

use std::io::Write;

use chrono::NaiveDate;

use crate::display::format_budget_status;
use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{KharchaError, KharchaResult};
use crate::models::{Category, Expense, Money, MonthlyBudget};
use crate::services::budget::BudgetStatus;

use super::aggregate::{
    biggest_category, category_spending, monthly_average, total_spending, CategoryTotal,
    NO_CATEGORY_LABEL,
};
use super::trend::{monthly_trend, six_month_window, TrendPoint};

#[derive(Debug, Clone)]
pub struct SpendingSummary {
    pub as_of: NaiveDate,
    pub total_spending: Money,
    pub monthly_average: Money,
    pub biggest_category: Option<Category>,
    pub expense_count: usize,
    /// All five categories, zero-filled
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
    pub budget: BudgetStatus,
}

impl SpendingSummary {
    pub fn generate(expenses: &[Expense], budgets: &[MonthlyBudget], today: NaiveDate) -> Self {
        Self {
            as_of: today,
            total_spending: total_spending(expenses),
            monthly_average: monthly_average(expenses),
            biggest_category: biggest_category(expenses),
            expense_count: expenses.len(),
            categories: category_spending(expenses),
            trend: monthly_trend(expenses, &six_month_window(today)),
            budget: BudgetStatus::for_today(budgets, expenses, today),
        }
    }

    pub fn biggest_category_label(&self) -> &'static str {
        self.biggest_category
            .map(|c| c.label())
            .unwrap_or(NO_CATEGORY_LABEL)
    }

    /// Share of total spending for one category row
    fn share(&self, total: Money) -> f64 {
        if self.total_spending.is_zero() {
            0.0
        } else {
            total.percent_of(self.total_spending)
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard ({})\n", self.as_of));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Spending:   {:>12}\n", self.total_spending));
        output.push_str(&format!("Monthly Average:  {:>12}\n", self.monthly_average));
        output.push_str(&format!("Biggest Category: {:>12}\n", self.biggest_category_label()));
        output.push_str(&format!("Expenses:         {:>12}\n\n", self.expense_count));

        output.push_str(&format!("{:<16} {:>12} {:>6} {:>8}\n", "Category", "Amount", "Count", "%"));
        output.push_str(&separator(60));
        output.push('\n');
        for row in &self.categories {
            output.push_str(&format!(
                "{:<16} {:>12} {:>6} {:>8}\n",
                row.category,
                row.total,
                row.count,
                format_percentage(self.share(row.total))
            ));
        }

        output.push_str("\nTrend\n");
        output.push_str(&separator(60));
        output.push('\n');
        let max = self
            .trend
            .iter()
            .map(|p| p.total.as_f64())
            .fold(0.0_f64, f64::max);
        for point in &self.trend {
            output.push_str(&format!(
                "{:<4} {} {:>12}\n",
                point.label(),
                format_bar(point.total.as_f64(), max, 30),
                point.total
            ));
        }

        output.push('\n');
        output.push_str(&format_budget_status(&self.budget));
        output
    }

    /// Per-category rows as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KharchaResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Category", "Amount", "Count", "Percentage"])
            .map_err(|e| KharchaError::Export(e.to_string()))?;

        for row in &self.categories {
            csv_writer
                .write_record([
                    row.category.label().to_string(),
                    row.total.to_decimal_string(),
                    row.count.to_string(),
                    format!("{:.2}", self.share(row.total)),
                ])
                .map_err(|e| KharchaError::Export(e.to_string()))?;
        }

        csv_writer
            .write_record([
                "TOTAL".to_string(),
                self.total_spending.to_decimal_string(),
                self.expense_count.to_string(),
                String::new(),
            ])
            .map_err(|e| KharchaError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| KharchaError::Export(e.to_string()))?;

        Ok(())
    }
}

/// Count and total of a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredSummary {
    pub count: usize,
    pub total: Money,
}

impl FilteredSummary {
    pub fn of(view: &[Expense]) -> Self {
        Self {
            count: view.len(),
            total: total_spending(view),
        }
    }

    pub fn format_terminal(&self) -> String {
        let noun = if self.count == 1 { "expense" } else { "expenses" };
        format!("{} {}, total {}", self.count, noun, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("Groceries", Category::Food, date(2024, 5, 3), Money::from_units(100)),
            Expense::new("Takeaway", Category::Food, date(2024, 4, 9), Money::from_units(50)),
            Expense::new("Metro", Category::Transport, date(2024, 5, 7), Money::from_units(30)),
        ]
    }

    #[test]
    fn test_generate_summary() {
        let budgets = vec![MonthlyBudget::new(2024, 5, Money::from_units(100))];
        let summary = SpendingSummary::generate(&sample(), &budgets, date(2024, 5, 20));

        assert_eq!(summary.total_spending, Money::from_units(180));
        assert_eq!(summary.monthly_average, Money::from_units(60));
        assert_eq!(summary.biggest_category_label(), "Food");
        assert_eq!(summary.categories.len(), 5);
        assert_eq!(summary.trend.len(), 6);
        assert_eq!(summary.trend[3].total, Money::from_units(50));
        assert_eq!(summary.budget.spent, Money::from_units(130));
        assert!(summary.budget.is_over_budget());

        let text = summary.format_terminal();
        assert!(text.contains("Biggest Category"));
        assert!(text.contains("Transport"));
        assert!(text.contains("Over budget"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = SpendingSummary::generate(&[], &[], date(2024, 9, 1));
        assert_eq!(summary.total_spending, Money::zero());
        assert_eq!(summary.biggest_category_label(), "None");
        assert!(summary.format_terminal().contains("No budget set"));
    }

    #[test]
    fn test_export_csv() {
        let summary = SpendingSummary::generate(&sample(), &[], date(2024, 5, 20));
        let mut out = Vec::new();
        summary.export_csv(&mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("Category,Amount,Count,Percentage\n"));
        assert!(csv.contains("Food,150.00,2,83.33"));
        assert!(csv.contains("Utilities,0.00,0,0.00"));
        assert!(csv.contains("TOTAL,180.00,3,"));
    }

    #[test]
    fn test_filtered_summary() {
        let summary = FilteredSummary::of(&sample()[..1]);
        assert_eq!(summary.format_terminal(), "1 expense, total $100.00");
        assert_eq!(FilteredSummary::of(&[]).total, Money::zero());
    }
}
