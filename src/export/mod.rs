//! Export module for Livraria
//!
//! Serializes the full catalog to the CSV exchange format read back by
//! [`crate::services::ImportService`].

pub mod csv;

pub use self::csv::{export_all, export_books_csv, CSV_HEADER};
