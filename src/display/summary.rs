//! Display formatting for data-lifecycle results
//!
//! Backups, prune reports, import results and the activity log.

use chrono::{DateTime, Utc};

use crate::audit::AuditEntry;
use crate::backup::{BackupInfo, PruneReport};
use crate::services::ImportResult;

/// Format the list of snapshots, newest first
pub fn format_backup_list(backups: &[BackupInfo], now: DateTime<Utc>) -> String {
    if backups.is_empty() {
        return "No backups found.\nCreate one with: livraria backup create\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Available Backups\n");
    output.push_str("=================\n\n");

    for (i, backup) in backups.iter().enumerate() {
        let age = now.signed_duration_since(backup.created_at);
        output.push_str(&format!(
            "  {}. {} ({} ago, {})\n",
            i + 1,
            backup.filename,
            format_duration(age),
            format_size(backup.size_bytes),
        ));
    }

    output.push_str(&format!("\nTotal: {} backup(s)\n", backups.len()));
    output
}

/// Format the outcome of a retention pass
pub fn format_prune_report(report: &PruneReport) -> String {
    let mut output = String::new();

    for name in &report.removed {
        output.push_str(&format!("Old backup removed: {}\n", name));
    }
    for (name, reason) in &report.failures {
        output.push_str(&format!("Could not remove {}: {}\n", name, reason));
    }

    output
}

/// Format an import summary
pub fn format_import_result(result: &ImportResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} book(s) imported\n", result.imported));
    if result.duplicates_skipped > 0 {
        output.push_str(&format!(
            "{} row(s) skipped: identifier already exists\n",
            result.duplicates_skipped
        ));
    }
    if result.malformed > 0 {
        output.push_str(&format!("{} malformed row(s) skipped:\n", result.malformed));
        for (row, message) in &result.error_messages {
            output.push_str(&format!("  row {}: {}\n", row, message));
        }
    }

    output
}

/// Format activity log entries, oldest first
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No activity recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
