//! Backup manager for Livraria
//!
//! Snapshots are byte-for-byte copies of the SQLite file named
//! `backup_livraria_<YYYY-MM-DD_HH-MM-SS>.db` (UTC). Backups taken within the
//! same second get a `_01`, `_02`, ... suffix, which keeps lexicographic order
//! equal to creation order. If the clock reads earlier than the newest
//! snapshot on disk, the new one reuses that snapshot's second so it still
//! sorts last and is never the first to be pruned.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::LivrariaPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LivrariaError, LivrariaResult};
use crate::storage::copy_atomic;

/// File name prefix shared by all snapshots
pub const BACKUP_PREFIX: &str = "backup_livraria_";

/// File name extension of snapshots
pub const BACKUP_EXTENSION: &str = ".db";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Highest same-second disambiguator
const MAX_SUFFIX: u32 = 99;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created (second precision)
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Outcome of a pruning pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    /// Snapshots that were deleted
    pub removed: Vec<String>,
    /// Snapshots that could not be deleted, with the reason
    pub failures: Vec<(String, String)>,
}

impl PruneReport {
    /// True when every eviction succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Path to the store being snapshotted
    database_file: PathBuf,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LivrariaPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            database_file: paths.database_file(),
            retention,
        }
    }

    /// Copy the store into a new snapshot
    ///
    /// Fails without leaving any file behind if the store is missing or the
    /// copy cannot complete.
    pub fn create_backup(&self) -> LivrariaResult<BackupInfo> {
        if !self.database_file.is_file() {
            return Err(LivrariaError::Backup(format!(
                "Database file not found: {}",
                self.database_file.display()
            )));
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LivrariaError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = self.unused_filename(now)?;
        let path = self.backup_dir.join(&filename);
        let created_at =
            parse_backup_timestamp(&filename).unwrap_or_else(|| truncate_to_second(now));

        let size_bytes = copy_atomic(&self.database_file, &path)
            .map_err(|e| LivrariaError::Backup(e.to_string()))?;

        Ok(BackupInfo {
            filename,
            path,
            created_at,
            size_bytes,
        })
    }

    /// Pick a snapshot name for `now` that sorts after every existing one
    ///
    /// Older snapshots from the same second may already have been pruned, so
    /// the next suffix follows the highest one still present.
    fn unused_filename(&self, now: DateTime<Utc>) -> LivrariaResult<String> {
        let names = self.snapshot_filenames()?;

        let mut stamp = now.format(TIMESTAMP_FORMAT).to_string();
        if let Some(newest) = names.last().and_then(|name| snapshot_stamp(name)) {
            if newest > stamp.as_str() {
                stamp = newest.to_string();
            }
        }
        let same_second = format!("{}{}", BACKUP_PREFIX, stamp);

        let highest = names
            .iter()
            .filter_map(|name| name.strip_prefix(&same_second))
            .filter_map(|rest| rest.strip_suffix(BACKUP_EXTENSION))
            .map(|rest| rest.trim_start_matches('_').parse::<u32>().unwrap_or(0))
            .max();

        let suffix = match highest {
            None => return Ok(format!("{}{}", same_second, BACKUP_EXTENSION)),
            Some(n) => n + 1,
        };

        if suffix > MAX_SUFFIX {
            return Err(LivrariaError::Backup(format!(
                "Too many backups within the same second ({})",
                stamp
            )));
        }

        Ok(format!("{}_{:02}{}", same_second, suffix, BACKUP_EXTENSION))
    }

    /// List all snapshots, newest first
    pub fn list_backups(&self) -> LivrariaResult<Vec<BackupInfo>> {
        let mut backups: Vec<BackupInfo> = self
            .snapshot_filenames()?
            .into_iter()
            .filter_map(|name| self.parse_backup_info(&self.backup_dir.join(name)))
            .collect();

        // Filenames sort chronologically
        backups.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(backups)
    }

    /// Names of entries that follow the snapshot naming convention, sorted
    fn snapshot_filenames(&self) -> LivrariaResult<Vec<String>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LivrariaError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| LivrariaError::Io(format!("Failed to read directory entry: {}", e)))?;

            let name = entry.file_name().to_string_lossy().to_string();
            if parse_backup_timestamp(&name).is_some() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Parse backup info from a snapshot path
    fn parse_backup_info(&self, path: &Path) -> Option<BackupInfo> {
        if !path.is_file() {
            return None;
        }
        let filename = path.file_name()?.to_string_lossy().to_string();
        let created_at = parse_backup_timestamp(&filename)?;
        let size_bytes = fs::metadata(path).ok()?.len();

        Some(BackupInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            size_bytes,
        })
    }

    /// Delete all but the most recent snapshots allowed by the retention policy
    ///
    /// A file that can't be deleted is recorded in the report and the pass
    /// moves on to the next candidate.
    pub fn prune(&self) -> LivrariaResult<PruneReport> {
        let names = self.snapshot_filenames()?;
        let keep = self.retention.keep as usize;
        let mut report = PruneReport::default();

        if names.len() <= keep {
            return Ok(report);
        }

        let evict = names.len() - keep;
        for name in names.into_iter().take(evict) {
            match fs::remove_file(self.backup_dir.join(&name)) {
                Ok(()) => report.removed.push(name),
                Err(e) => report.failures.push((name, e.to_string())),
            }
        }

        Ok(report)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> LivrariaResult<(BackupInfo, PruneReport)> {
        let backup = self.create_backup()?;
        let report = self.prune()?;
        Ok((backup, report))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> LivrariaResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// Parse the creation time out of a snapshot file name
///
/// Accepts `backup_livraria_YYYY-MM-DD_HH-MM-SS.db` with an optional `_NN`
/// disambiguator before the extension.
pub fn parse_backup_timestamp(filename: &str) -> Option<DateTime<Utc>> {
    let stem = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?;

    // "YYYY-MM-DD_HH-MM-SS" is 19 characters
    if stem.len() < 19 || !stem.is_char_boundary(19) {
        return None;
    }
    let (stamp, rest) = stem.split_at(19);

    if !rest.is_empty() {
        let suffix = rest.strip_prefix('_')?;
        if suffix.len() != 2 || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Some(DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// The `YYYY-MM-DD_HH-MM-SS` part of a snapshot name
fn snapshot_stamp(filename: &str) -> Option<&str> {
    filename.strip_prefix(BACKUP_PREFIX)?.get(..19)
}

fn truncate_to_second(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.timestamp(), 0).unwrap_or(timestamp)
}
