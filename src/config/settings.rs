//! User settings for Livraria
//!
//! Manages user preferences including backup retention, the currency symbol
//! used for display and the default export file name.

use serde::{Deserialize, Serialize};

use super::paths::{LivrariaPaths, DEFAULT_EXPORT_FILENAME};
use crate::error::LivrariaError;

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of most recent snapshots to keep
    pub keep: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep: 5 }
    }
}

/// User settings for Livraria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Currency symbol shown next to prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// File name used by `export` when no output is given
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: BackupRetention::default(),
            currency_symbol: default_currency(),
            export_filename: default_export_filename(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &LivrariaPaths) -> Result<Self, LivrariaError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LivrariaError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LivrariaError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LivrariaPaths) -> Result<(), LivrariaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LivrariaError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LivrariaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), LivrariaError> {
        if self.backup_retention.keep == 0 {
            return Err(LivrariaError::Config(
                "backup_retention.keep must be at least 1".into(),
            ));
        }
        if self.export_filename.trim().is_empty() {
            return Err(LivrariaError::Config(
                "export_filename cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
