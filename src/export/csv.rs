//! CSV export of expenses, trips and budgets

use std::io::Write;

use crate::error::{KharchaError, KharchaResult};
use crate::models::{Expense, MonthlyBudget, Trip};

fn export_err(e: csv::Error) -> KharchaError {
    KharchaError::Export(e.to_string())
}

/// Write `expenses` in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> KharchaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Description", "Category", "Amount"])
        .map_err(export_err)?;

    for expense in expenses {
        csv_writer
            .write_record([
                expense.id.as_str(),
                &expense.date.to_string(),
                &expense.description,
                expense.category.label(),
                &expense.amount.to_decimal_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| KharchaError::Export(e.to_string()))
}

pub fn export_trips_csv<W: Write>(trips: &[Trip], writer: W) -> KharchaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Destination", "Start Date", "End Date", "Budget", "Description"])
        .map_err(export_err)?;

    for trip in trips {
        csv_writer
            .write_record([
                trip.id.as_str(),
                &trip.destination,
                &trip.start_date.to_string(),
                &trip.end_date.to_string(),
                &trip.budget.to_decimal_string(),
                &trip.description,
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| KharchaError::Export(e.to_string()))
}

/// Budgets, oldest month first
pub fn export_budgets_csv<W: Write>(budgets: &[MonthlyBudget], writer: W) -> KharchaResult<()> {
    let mut sorted = budgets.to_vec();
    sorted.sort_by_key(|b| (b.year, b.month));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["Year", "Month", "Amount"])
        .map_err(export_err)?;

    for budget in &sorted {
        csv_writer
            .write_record([
                budget.year.to_string(),
                format!("{:02}", budget.month),
                budget.amount.to_decimal_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| KharchaError::Export(e.to_string()))
}
