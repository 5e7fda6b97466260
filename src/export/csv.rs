//! CSV export
//!
//! Dumps the whole catalog as `ID,Título,Autor,Ano,Preço` rows. Quoting of
//! titles and authors containing commas or quotes is left to the `csv` crate.

use std::io::Write;
use std::path::Path;

use serde_json::json;

use crate::audit::{EntityType, Operation};
use crate::error::{LivrariaError, LivrariaResult};
use crate::models::Book;
use crate::storage::{write_atomic, Storage};

/// Header row of the exchange file
pub const CSV_HEADER: [&str; 5] = ["ID", "Título", "Autor", "Ano", "Preço"];

/// Write `books` as CSV, returning the number of data rows
pub fn export_books_csv<W: Write>(books: &[Book], writer: W) -> LivrariaResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| LivrariaError::Export(e.to_string()))?;

    for book in books {
        csv_writer
            .write_record([
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.year.to_string(),
                book.price.to_string(),
            ])
            .map_err(|e| LivrariaError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LivrariaError::Export(e.to_string()))?;

    Ok(books.len())
}

/// Export the full catalog to `destination`
///
/// The file only appears under its final name once every row is written.
/// An empty catalog yields a header-only file.
pub fn export_all(storage: &Storage, destination: &Path) -> LivrariaResult<usize> {
    let books = storage.books.get_all()?;

    let count = write_atomic(destination, |writer| export_books_csv(&books, writer)).map_err(
        |e| match e {
            LivrariaError::Export(_) => e,
            other => LivrariaError::Export(other.to_string()),
        },
    )?;

    storage.log_lifecycle(
        Operation::Export,
        EntityType::Catalog,
        destination.display().to_string(),
        &json!({ "rows": count }),
        format!("{} book(s) exported", count),
    );

    Ok(count)
}
