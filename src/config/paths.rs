//! Path management for Nest Wealth
//!
//! ## Path Resolution Order
//!
//! 1. `NEST_WEALTH_DATA_DIR` environment variable (if set)
//! 2. The platform config directory, via the `directories` crate
//!    (`~/.config/nest-wealth` on Linux, `~/Library/Application Support/nest-wealth`
//!    on macOS, `%APPDATA%\nest-wealth\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::NestError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "NEST_WEALTH_DATA_DIR";

/// Manages all paths used by Nest Wealth
#[derive(Debug, Clone)]
pub struct NestPaths {
    base_dir: PathBuf,
}

impl NestPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, NestError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "nest-wealth")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    NestError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default export directory (`<base>/exports/`)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to book.json (transactions, categories and budgets)
    pub fn book_file(&self) -> PathBuf {
        self.data_dir().join("book.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), NestError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| NestError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| NestError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `nest init` has run (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = NestPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().join("nested"));
        assert!(!paths.is_initialized());

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.book_file(),
            temp_dir.path().join("data").join("book.json")
        );
    }
}
