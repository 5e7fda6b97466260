//! Service layer for Livraria
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging and bulk import.

pub mod book;
pub mod import;

pub use book::BookService;
pub use import::{ImportResult, ImportService};
