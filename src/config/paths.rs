//! Path management for Kharcha
//!
//! ## Path Resolution Order
//!
//! 1. `KHARCHA_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/kharcha` or `~/.config/kharcha`
//! 3. Windows: `%APPDATA%\kharcha`

use std::path::PathBuf;

use crate::error::KharchaError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "KHARCHA_DATA_DIR";

/// Manages all paths used by Kharcha
#[derive(Debug, Clone)]
pub struct KharchaPaths {
    base_dir: PathBuf,
}

impl KharchaPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, KharchaError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create KharchaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON blob per (entity kind, principal)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), KharchaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KharchaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| KharchaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, KharchaError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| KharchaError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("kharcha"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, KharchaError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| KharchaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("kharcha"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KharchaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KharchaPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_settings_file_location() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KharchaPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
