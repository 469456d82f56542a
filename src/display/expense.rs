//! Expense display formatting

use crate::models::{Expense, ExpenseId};
use crate::services::Selection;

use super::report::truncate;

/// One register row: selection marker, date, badge, description, amount
pub fn format_expense_row(expense: &Expense, selected: bool, date_format: &str) -> String {
    format!(
        "{} {:10} {:<13} {:<28} {:>12}  {}",
        if selected { "[x]" } else { "[ ]" },
        expense.date.format(date_format),
        expense.badge(),
        truncate(&expense.description, 28),
        expense.amount,
        expense.id
    )
}

pub fn format_expense_list(
    expenses: &[Expense],
    selection: &Selection<ExpenseId>,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:3} {:10} {:<13} {:<28} {:>12}  {}\n",
        "Sel", "Date", "Category", "Description", "Amount", "ID"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(
            expense,
            selection.contains(&expense.id),
            date_format,
        ));
        output.push('\n');
    }

    output
}

pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {} ({})\n", expense.category, expense.badge()));
    output.push_str(&format!("Amount:      {}\n", expense.amount));
    output
}
