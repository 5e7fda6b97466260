//! Storage layer for Livraria
//!
//! The catalog lives in a single SQLite file. This module owns the schema,
//! the book repository, the audit log handle and the atomic file helpers used
//! by export and backup.

pub mod books;
pub mod file_io;
pub mod init;

pub use books::BookRepository;
pub use file_io::{copy_atomic, write_atomic};
pub use init::initialize_storage;

use std::cell::RefCell;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::LivrariaPaths;
use crate::error::LivrariaError;

/// Main storage coordinator
///
/// Audit entries are written after the change they describe is committed.
/// A failed append can't undo that change, so it is kept as a pending
/// warning for the caller to report instead of failing the operation.
pub struct Storage {
    paths: LivrariaPaths,
    pub books: BookRepository,
    audit: AuditLogger,
    audit_failures: RefCell<Vec<String>>,
}

impl Storage {
    /// Create a Storage instance, bootstrapping directories and schema
    pub fn new(paths: LivrariaPaths) -> Result<Self, LivrariaError> {
        initialize_storage(&paths)?;

        Ok(Self {
            books: BookRepository::new(paths.database_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_failures: RefCell::new(Vec::new()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LivrariaPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Drain the audit failures recorded since the last call
    pub fn take_audit_failures(&self) -> Vec<String> {
        self.audit_failures.take()
    }

    fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            self.audit_failures.borrow_mut().push(format!(
                "{} {} {} was not written to {}: {}",
                entry.operation,
                entry.entity_type,
                entry.entity_id,
                self.audit.path().display(),
                e
            ));
        }
    }

    /// Log a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record(AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ));
    }

    /// Log an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        self.record(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ));
    }

    /// Log a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record(AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ));
    }

    /// Log an import, export or backup run
    pub fn log_lifecycle<T: Serialize>(
        &self,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        details: &T,
        summary: impl Into<String>,
    ) {
        self.record(AuditEntry::lifecycle(
            operation,
            entity_type,
            entity_id,
            details,
            summary,
        ));
    }
}
