//! Aggregation engine
//!
//! Pure functions over an expense snapshot. Nothing here caches: every call
//! recomputes from the slice it is given. Zero and negative amounts are
//! summed like any other value.

use crate::models::{Category, Expense, Money};

/// Label shown when no category has positive spending
pub const NO_CATEGORY_LABEL: &str = "None";

/// Sum of every amount in the snapshot
pub fn total_spending(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Total divided by the record count, or zero for an empty snapshot
pub fn monthly_average(expenses: &[Expense]) -> Money {
    total_spending(expenses).div_count(expenses.len())
}

/// Total and record count for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

/// Group-sum by category, in the order each category first appears
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
                count: 1,
            }),
        }
    }

    totals
}

/// Totals for every category in canonical order, zero-filled
pub fn category_spending(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let found = category_totals(expenses);

    Category::all()
        .iter()
        .map(|&category| {
            found
                .iter()
                .find(|t| t.category == category)
                .copied()
                .unwrap_or(CategoryTotal {
                    category,
                    total: Money::zero(),
                    count: 0,
                })
        })
        .collect()
}

/// Category with the strictly greatest total
///
/// The running maximum starts at zero, so only a positive total can win, and
/// on a tie the category encountered first keeps the lead.
pub fn biggest_category(expenses: &[Expense]) -> Option<Category> {
    let mut best: Option<Category> = None;
    let mut max = Money::zero();

    for entry in category_totals(expenses) {
        if entry.total > max {
            max = entry.total;
            best = Some(entry.category);
        }
    }

    best
}

/// [`biggest_category`] as a display label, `"None"` when there is none
pub fn biggest_category_label(expenses: &[Expense]) -> &'static str {
    biggest_category(expenses)
        .map(|c| c.label())
        .unwrap_or(NO_CATEGORY_LABEL)
}
