//! Monthly budget CLI commands

use chrono::Datelike;
use clap::Subcommand;

use crate::display::format_budget_status;
use crate::error::{KharchaError, KharchaResult};
use crate::models::MonthlyBudget;
use crate::session::Session;

use super::{parse_amount, require_user, today};

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month, replacing any existing one
    Set {
        /// Amount (e.g. "500")
        amount: String,
        /// Four-digit year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Month number 1-12, defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Show budget versus spending for a month
    Status {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// List every month with a budget
    List,
}

fn resolve_month(year: Option<i32>, month: Option<u32>) -> KharchaResult<(i32, u32)> {
    let now = today();
    let year = year.unwrap_or(now.year());
    let month = month.unwrap_or(now.month());
    if !(1..=12).contains(&month) {
        return Err(KharchaError::Validation(format!(
            "Month must be 1-12 (got {})",
            month
        )));
    }
    Ok((year, month))
}

pub fn handle_budget_command(session: &mut Session, cmd: BudgetCommands) -> KharchaResult<()> {
    require_user(session)?;

    match cmd {
        BudgetCommands::Set {
            amount,
            year,
            month,
        } => {
            let (year, month) = resolve_month(year, month)?;
            let budget = MonthlyBudget::new(year, month, parse_amount(&amount)?);
            budget
                .validate()
                .map_err(|e| KharchaError::Validation(e.to_string()))?;

            let previous = session.budget_for(year, month);
            session.set_budget(year, month, budget.amount)?;

            match previous {
                Some(old) => println!("Budget for {}-{:02}: {} -> {}", year, month, old, budget.amount),
                None => println!("Budget set: {}", budget),
            }
        }

        BudgetCommands::Status { year, month } => {
            let (year, month) = resolve_month(year, month)?;
            print!("{}", format_budget_status(&session.budget_status(year, month)));
        }

        BudgetCommands::List => {
            let mut budgets = session.budgets().to_vec();
            if budgets.is_empty() {
                println!("No budgets set.");
                return Ok(());
            }
            budgets.sort_by_key(|b| (b.year, b.month));
            for budget in &budgets {
                println!("{}", budget);
            }
        }
    }

    Ok(())
}
