//! Expense CLI commands

use std::collections::HashSet;

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{KharchaError, KharchaResult};
use crate::models::{Expense, ExpenseId, ExpenseUpdate};
use crate::reports::FilteredSummary;
use crate::services::filter::{parse_category_filter, parse_month, parse_year};
use crate::services::{ExpenseFilter, SortOrder};
use crate::session::Session;

use super::{parse_amount, parse_category, parse_date, parse_optional_date, require_user, today};

/// Filter options shared by listing and bulk deletion
#[derive(Args, Debug, Default)]
pub struct ExpenseFilterArgs {
    /// Case-insensitive text to find in descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category label, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Month number (01-12)
    #[arg(long)]
    pub month: Option<String>,

    /// Four-digit year
    #[arg(long)]
    pub year: Option<String>,

    /// date-desc, date-asc, amount-desc or amount-asc
    #[arg(long)]
    pub sort: Option<String>,
}

impl ExpenseFilterArgs {
    pub fn to_filter(&self, default_sort: SortOrder) -> KharchaResult<ExpenseFilter> {
        let sort = match &self.sort {
            Some(s) => s.parse()?,
            None => default_sort,
        };

        Ok(ExpenseFilter::new()
            .search(self.search.clone().unwrap_or_default())
            .category(parse_category_filter(self.category.as_deref().unwrap_or("all"))?)
            .date_range(
                parse_optional_date(self.from.as_deref())?,
                parse_optional_date(self.to.as_deref())?,
            )
            .month(parse_month(self.month.as_deref().unwrap_or(""))?)
            .year(parse_year(self.year.as_deref().unwrap_or(""))?)
            .sort(sort))
    }
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        description: String,
        /// Amount (e.g. "12.50")
        amount: String,
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses, optionally filtered and sorted
    List {
        #[command(flatten)]
        filter: ExpenseFilterArgs,
    },

    /// Show one expense
    Show { id: String },

    /// Change fields of an expense
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete expenses by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete every expense matching a filter
    DeleteMatching {
        #[command(flatten)]
        filter: ExpenseFilterArgs,
    },

    /// Delete all expenses
    Clear {
        /// Required to actually clear
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_expense_command(
    session: &mut Session,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> KharchaResult<()> {
    require_user(session)?;

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let category = parse_category(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let expense = Expense::new(description.trim(), category, date, parse_amount(&amount)?);
            expense
                .validate()
                .map_err(|e| KharchaError::Validation(e.to_string()))?;

            session.add_expense(expense.clone())?;
            println!("Added expense: {}", expense);
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { filter } => {
            let filter = filter.to_filter(settings.default_sort)?;
            let view = session.filtered_expenses(&filter);

            print!(
                "{}",
                format_expense_list(&view, session.expense_selection(), &settings.date_format)
            );
            println!();
            println!("{}", FilteredSummary::of(&view).format_terminal());
        }

        ExpenseCommands::Show { id } => {
            let expense = session
                .expense(&ExpenseId::from(id.as_str()))
                .ok_or_else(|| KharchaError::expense_not_found(&id))?;
            print!("{}", format_expense_details(expense));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let expense_id = ExpenseId::from(id.as_str());
            let mut candidate = session
                .expense(&expense_id)
                .cloned()
                .ok_or_else(|| KharchaError::expense_not_found(&id))?;

            let mut update = ExpenseUpdate::new();
            if let Some(description) = description {
                update = update.description(description.trim());
            }
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                update = update.category(parse_category(&category)?);
            }
            if let Some(date) = date {
                update = update.date(parse_date(&date)?);
            }

            if update.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            update.apply_to(&mut candidate);
            candidate
                .validate()
                .map_err(|e| KharchaError::Validation(e.to_string()))?;

            session.update_expense(&expense_id, &update)?;
            println!("Updated expense: {}", candidate);
        }

        ExpenseCommands::Delete { ids } => {
            let ids: HashSet<ExpenseId> = ids.iter().map(|s| ExpenseId::from(s.as_str())).collect();
            let deleted = session.delete_expenses(&ids)?;
            if deleted < ids.len() {
                println!("Deleted {} of {} expenses (others not found).", deleted, ids.len());
            } else {
                println!("Deleted {} expense(s).", deleted);
            }
        }

        ExpenseCommands::DeleteMatching { filter } => {
            let filter = filter.to_filter(settings.default_sort)?;
            if filter.is_unrestricted() {
                return Err(KharchaError::Validation(
                    "Refusing to delete without a filter; use 'expense clear --force' to delete everything"
                        .into(),
                ));
            }

            let view = session.filtered_expenses(&filter);
            session.select_all_expenses(&view);
            let deleted = session.delete_selected_expenses()?;
            println!("Deleted {} matching expense(s).", deleted);
        }

        ExpenseCommands::Clear { force } => {
            if !force {
                println!(
                    "This deletes all {} expenses. Re-run with --force to confirm.",
                    session.expenses().len()
                );
                return Ok(());
            }
            session.clear_expenses()?;
            println!("All expenses cleared.");
        }
    }

    Ok(())
}
