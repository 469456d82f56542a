//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Datelike;
use clap::Subcommand;

use crate::display::format_expense_list;
use crate::display::report::{format_bar, separator};
use crate::error::{KharchaError, KharchaResult};
use crate::reports::{daily_breakdown, expenses_in_month, monthly_breakdown, SpendingSummary};
use crate::services::filter::parse_month;
use crate::services::Selection;
use crate::session::Session;

use super::{parse_date, require_user, today};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Headline totals, category spending, trend and this month's budget
    Dashboard {
        /// Report as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<String>,
        /// Write the category table as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Totals per calendar month
    Monthly,

    /// Totals per day within one month, plus that month's expenses
    Daily {
        /// Four-digit year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Month (01-12), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_report_command(
    session: &Session,
    date_format: &str,
    cmd: ReportCommands,
) -> KharchaResult<()> {
    require_user(session)?;

    match cmd {
        ReportCommands::Dashboard { date, csv } => {
            let as_of = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let summary = SpendingSummary::generate(session.expenses(), session.budgets(), as_of);

            match csv {
                Some(path) => {
                    let file = File::create(&path)
                        .map_err(|e| KharchaError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
                    summary.export_csv(&mut BufWriter::new(file))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", summary.format_terminal()),
            }
        }

        ReportCommands::Monthly => {
            let months = monthly_breakdown(session.expenses());
            if months.is_empty() {
                println!("No expenses recorded.");
                return Ok(());
            }

            let max = months.iter().map(|m| m.total.as_f64()).fold(0.0_f64, f64::max);
            println!("{:<8} {:>12} {:>6}", "Month", "Total", "Count");
            println!("{}", separator(60));
            for month in &months {
                println!(
                    "{:<8} {:>12} {:>6}  {}",
                    month.key(),
                    month.total,
                    month.count,
                    format_bar(month.total.as_f64(), max, 25)
                );
            }
        }

        ReportCommands::Daily { year, month } => {
            let now = today();
            let year = year.unwrap_or(now.year());
            let month = parse_month(month.as_deref().unwrap_or(""))?.unwrap_or(now.month());

            let days = daily_breakdown(session.expenses(), year, month);
            println!("Daily spending for {}-{:02}", year, month);
            println!("{}", separator(40));
            if days.is_empty() {
                println!("No expenses in this month.");
                return Ok(());
            }
            for day in &days {
                println!("{}  {:>12} {:>4}", day.date, day.total, day.count);
            }
            println!();

            let listing = expenses_in_month(session.expenses(), year, month);
            print!("{}", format_expense_list(&listing, &Selection::new(), date_format));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, Money, Principal};
    use crate::session::Session;
    use crate::storage::Storage;
    use chrono::NaiveDate;

    #[test]
    fn test_dashboard_csv_written() {
        let mut session = Session::new(Storage::in_memory());
        session.switch_principal(Principal::parse("a@b.com")).unwrap();
        session
            .add_expense(Expense::new(
                "Lunch",
                Category::Food,
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                Money::from_units(12),
            ))
            .unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.csv");
        handle_report_command(
            &session,
            "%Y-%m-%d",
            ReportCommands::Dashboard {
                date: Some("2024-05-20".into()),
                csv: Some(path.clone()),
            },
        )
        .unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Food"));
    }

    #[test]
    fn test_reports_require_user() {
        let session = Session::new(Storage::in_memory());
        assert!(handle_report_command(&session, "%Y-%m-%d", ReportCommands::Monthly).is_err());
    }
}
