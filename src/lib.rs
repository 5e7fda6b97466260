//! Livraria - Terminal-based book catalog manager
//!
//! This library provides the core functionality for the Livraria catalog
//! manager: book records kept in a local SQLite file, rolling backups of that
//! file and CSV export/import of the whole catalog.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (books and their identifiers)
//! - `storage`: SQLite storage layer and atomic file helpers
//! - `services`: Business logic layer (catalog CRUD, CSV import)
//! - `export`: CSV export
//! - `backup`: Snapshot creation and retention
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::config::paths::LivrariaPaths;
//! use livraria::services::BookService;
//! use livraria::storage::Storage;
//!
//! let storage = Storage::new(LivrariaPaths::with_base_dir("meu_sistema_livraria"))?;
//! let book = BookService::new(&storage).create("Dom Casmurro", "Machado de Assis", 1899, 29.90)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LivrariaError, LivrariaResult};
