//! CLI commands for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{KharchaError, KharchaResult};
use crate::export::{csv, json, yaml};
use crate::reports::total_spending;
use crate::session::Session;

use super::require_user;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV (expenses only)
    Csv,
    /// JSON snapshot of everything the user owns
    Json,
    /// YAML snapshot, human-readable
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export expenses to CSV
    Expenses { output: PathBuf },

    /// Export trips to CSV
    Trips { output: PathBuf },

    /// Export monthly budgets to CSV
    Budgets { output: PathBuf },

    /// Show what an export would contain
    Info,
}

fn create_writer(output: &Path) -> KharchaResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        KharchaError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> KharchaResult<()> {
    let principal = require_user(session)?;

    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_writer(&output)?;
            match format {
                ExportFormat::Csv => {
                    csv::export_expenses_csv(session.expenses(), &mut writer)?;
                    println!("Expenses exported to: {}", output.display());
                    println!("Note: CSV exports expenses only. Use JSON or YAML for everything.");
                }
                ExportFormat::Json => {
                    json::export_full_json(session.storage(), &mut writer, pretty)?;
                    println!("Full export written to: {}", output.display());
                }
                ExportFormat::Yaml => {
                    yaml::export_full_yaml(session.storage(), &mut writer)?;
                    println!("Full export written to: {}", output.display());
                }
            }
        }

        ExportCommands::Expenses { output } => {
            csv::export_expenses_csv(session.expenses(), create_writer(&output)?)?;
            println!(
                "Exported {} expenses to: {}",
                session.expenses().len(),
                output.display()
            );
        }

        ExportCommands::Trips { output } => {
            csv::export_trips_csv(session.trips(), create_writer(&output)?)?;
            println!("Exported {} trips to: {}", session.trips().len(), output.display());
        }

        ExportCommands::Budgets { output } => {
            csv::export_budgets_csv(session.budgets(), create_writer(&output)?)?;
            println!(
                "Exported {} budgets to: {}",
                session.budgets().len(),
                output.display()
            );
        }

        ExportCommands::Info => {
            println!("Export Information");
            println!("==================");
            println!("User:           {}", principal);
            println!("Expenses:       {}", session.expenses().len());
            println!("Trips:          {}", session.trips().len());
            println!("Budgets:        {}", session.budgets().len());
            println!("Total spending: {}", total_spending(session.expenses()));
            println!();
            println!("Schema version: {}", json::EXPORT_SCHEMA_VERSION);
        }
    }

    Ok(())
}
