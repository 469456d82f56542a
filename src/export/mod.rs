//! Export module for Kharcha
//!
//! - CSV: expenses, trips or budgets (spreadsheet-compatible)
//! - JSON: everything the current user owns, machine-readable
//! - YAML: the same snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_expenses_csv, export_trips_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
