//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use serde_json::json;

use crate::audit::{EntityType, Operation};
use crate::backup::{BackupInfo, BackupManager, PruneReport};
use crate::config::settings::Settings;
use crate::display::summary::{format_backup_list, format_prune_report, format_size};
use crate::error::LivrariaResult;
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the database and prune old backups
    Create,

    /// List all available backups
    List,
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> LivrariaResult<()> {
    match cmd {
        BackupCommands::Create => {
            let (backup, report) = run_backup(storage, settings)?;
            println!("Backup created: {}", backup.filename);
            println!("Location: {}", backup.path.display());
            println!("Size: {}", format_size(backup.size_bytes));
            print!("{}", format_prune_report(&report));
        }

        BackupCommands::List => {
            let manager = BackupManager::new(storage.paths(), settings.backup_retention.clone());
            let backups = manager.list_backups()?;
            print!("{}", format_backup_list(&backups, chrono::Utc::now()));
        }
    }

    Ok(())
}

/// Snapshot the store, enforce retention and record both in the audit log
pub fn run_backup(
    storage: &Storage,
    settings: &Settings,
) -> LivrariaResult<(BackupInfo, PruneReport)> {
    let manager = BackupManager::new(storage.paths(), settings.backup_retention.clone());
    let (backup, report) = manager.create_backup_with_retention()?;

    storage.log_lifecycle(
        Operation::Backup,
        EntityType::Snapshot,
        backup.filename.clone(),
        &json!({
            "size_bytes": backup.size_bytes,
            "pruned": report.removed,
            "prune_failures": report.failures,
        }),
        format!(
            "snapshot created, {} pruned, {} failed",
            report.removed.len(),
            report.failures.len()
        ),
    );

    Ok((backup, report))
}
