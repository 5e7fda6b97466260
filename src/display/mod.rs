//! Display formatting for terminal output
//!
//! Provides utilities for formatting books and data-lifecycle results for
//! terminal display.

pub mod book;
pub mod summary;

pub use book::{format_book_details, format_book_list, format_price};
pub use summary::{
    format_audit_entries, format_backup_list, format_duration, format_import_result,
    format_prune_report, format_size,
};
