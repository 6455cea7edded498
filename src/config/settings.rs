//! User settings for Nest Wealth
//!
//! Display preferences and the defaults used when creating budgets and
//! categories. Every field has a default so older config files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::NestPaths;
use crate::error::NestError;
use crate::models::category::is_known_color;
use crate::models::BudgetPeriod;

/// User settings for Nest Wealth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Period used by `budget create` when none is given
    #[serde(default)]
    pub default_budget_period: BudgetPeriod,

    /// Color given to categories added without one
    #[serde(default = "default_category_color")]
    pub default_category_color: String,

    /// Number of transactions `txn list` shows without `--limit`
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category_color() -> String {
    "blue".to_string()
}

fn default_recent_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_budget_period: BudgetPeriod::default(),
            default_category_color: default_category_color(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &NestPaths) -> Result<Self, NestError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| NestError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| NestError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &NestPaths) -> Result<(), NestError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| NestError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| NestError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the rest of the program cannot use
    pub fn validate(&self) -> Result<(), NestError> {
        if !is_known_color(&self.default_category_color) {
            return Err(NestError::Config(format!(
                "Unknown default category color: {}",
                self.default_category_color
            )));
        }

        if self.recent_limit == 0 {
            return Err(NestError::Config("recent_limit must be at least 1".into()));
        }

        if self.date_format.trim().is_empty() {
            return Err(NestError::Config("date_format cannot be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_budget_period, BudgetPeriod::Monthly);
        assert_eq!(settings.default_category_color, "blue");
        assert_eq!(settings.recent_limit, 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "€".into(),
            default_budget_period: BudgetPeriod::Weekly,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.recent_limit, 20);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_category_color: "chartreuse".into(),
            ..Settings::default()
        };
        assert!(settings.save(&paths).is_err());
        assert!(!paths.settings_file().exists());
    }
}
