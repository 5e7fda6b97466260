//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod book;
pub mod exchange;
pub mod log;
pub mod menu;

pub use backup::{handle_backup_command, run_backup, BackupCommands};
pub use book::{handle_book_command, BookCommands};
pub use exchange::{handle_export_command, handle_import_command, resolve_exchange_path};
pub use log::handle_log_command;
pub use menu::MenuSession;
