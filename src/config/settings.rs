//! User settings for Kharcha
//!
//! Holds the remembered principal and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::KharchaPaths;
use crate::error::KharchaError;
use crate::models::Principal;
use crate::storage::file_io::write_atomic;
use crate::services::filter::SortOrder;

/// User settings for Kharcha
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Email of the principal whose records are loaded when no override is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Sort order used by listings when none is requested
    #[serde(default)]
    pub default_sort: SortOrder,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_user: None,
            date_format: default_date_format(),
            default_sort: SortOrder::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &KharchaPaths) -> Result<Self, KharchaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                KharchaError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KharchaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KharchaPaths) -> Result<(), KharchaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            KharchaError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        write_atomic(paths.settings_file(), &contents)
    }

    /// The remembered principal, if any
    pub fn principal(&self) -> Option<Principal> {
        self.current_user.as_deref().and_then(Principal::parse)
    }
}
