//! Path management for Livraria
//!
//! Every path the application touches hangs off a single base directory:
//!
//! ```text
//! <base>/
//!   config.json
//!   audit.log
//!   data/livraria.db
//!   backups/backup_livraria_*.db
//!   exports/livros_exportados.csv
//! ```
//!
//! The base directory is chosen at construction time, so several isolated
//! instances (tests, for one) can live side by side.

use std::path::{Path, PathBuf};

use crate::error::LivrariaError;

/// Base directory used when none is given on the command line
pub const DEFAULT_BASE_DIR: &str = "meu_sistema_livraria";

/// File name of the SQLite store inside the data directory
pub const DATABASE_FILENAME: &str = "livraria.db";

/// Default file name for CSV exports
pub const DEFAULT_EXPORT_FILENAME: &str = "livros_exportados.csv";

/// Manages all paths used by Livraria
#[derive(Debug, Clone)]
pub struct LivrariaPaths {
    /// Base directory for all Livraria data
    base_dir: PathBuf,
}

impl LivrariaPaths {
    /// Create paths rooted at `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the exports directory (<base>/exports/)
    pub fn exports_dir(&self) -> PathBuf {
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

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILENAME)
    }

    /// Resolve an export file name inside the exports directory
    pub fn export_file(&self, filename: &str) -> PathBuf {
        self.exports_dir().join(filename)
    }

    /// Ensure all required directories exist
    ///
    /// Creates base, data, backups and exports. Nothing else can work without
    /// them, so any failure is returned to the caller as fatal.
    pub fn ensure_directories(&self) -> Result<(), LivrariaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LivrariaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LivrariaError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LivrariaError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir()).map_err(|e| {
            LivrariaError::Io(format!("Failed to create exports directory: {}", e))
        })?;

        Ok(())
    }
}

impl Default for LivrariaPaths {
    fn default() -> Self {
        Self::with_base_dir(DEFAULT_BASE_DIR)
    }
}
