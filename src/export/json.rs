//! JSON export of one principal's records

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KharchaError, KharchaResult};
use crate::models::{Expense, Money, MonthlyBudget, Trip};
use crate::reports::total_spending;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything one principal owns, plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Email of the exported principal
    pub principal: String,

    pub expenses: Vec<Expense>,

    pub trips: Vec<Trip>,

    pub budgets: Vec<MonthlyBudget>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub trip_count: usize,
    pub budget_count: usize,
    pub total_spending: Money,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Snapshot the loaded principal's collections
    pub fn from_storage(storage: &Storage) -> KharchaResult<Self> {
        let principal = storage
            .principal()
            .ok_or_else(|| KharchaError::Export("No user selected; nothing to export".into()))?;

        let expenses = storage.expenses.all().to_vec();
        let trips = storage.trips.all().to_vec();
        let budgets = storage.budgets.all().to_vec();

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            trip_count: trips.len(),
            budget_count: budgets.len(),
            total_spending: total_spending(&expenses),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            principal: principal.email().to_string(),
            expenses,
            trips,
            budgets,
            metadata,
        })
    }
}

pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> KharchaResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| KharchaError::Export(e.to_string()))?;

    Ok(())
}
