//! Backup system for Livraria
//!
//! Snapshots are plain copies of the SQLite store kept in the `backups`
//! directory. After every snapshot the oldest files beyond the retention
//! limit (5 by default) are deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::backup::BackupManager;
//! use livraria::config::{paths::LivrariaPaths, settings::BackupRetention};
//!
//! let paths = LivrariaPaths::default();
//! let manager = BackupManager::new(&paths, BackupRetention::default());
//!
//! let (backup, report) = manager.create_backup_with_retention()?;
//! println!("{} ({} pruned)", backup.filename, report.removed.len());
//! ```

mod manager;

pub use manager::{
    parse_backup_timestamp, BackupInfo, BackupManager, PruneReport, BACKUP_EXTENSION,
    BACKUP_PREFIX,
};
