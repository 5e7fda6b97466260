//! Audit logging system for Livraria
//!
//! Records every create, update and delete of a book with before/after
//! values, plus import, export and backup runs, in an append-only log.
//!
//! - `AuditEntry`: one log entry with timestamp, operation, entity and
//!   optional before/after values.
//! - `AuditLogger`: writes entries as JSON lines.
//! - `book_diff`: human-readable summary of what changed in a book.
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Book,
//!     book.id.to_string(),
//!     Some(book.title.clone()),
//!     &book,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::book_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
