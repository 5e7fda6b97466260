//! Book repository backed by SQLite
//!
//! Every call opens its own connection, runs one statement and drops the
//! connection again, so each mutation is committed as soon as it returns.

use std::path::PathBuf;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{Book, BookId, NewBook};

const SELECT_BOOK: &str = "SELECT id, titulo, autor, ano_publicacao, preco FROM livros";

/// Repository for book persistence
pub struct BookRepository {
    db_path: PathBuf,
}

impl BookRepository {
    /// Create a repository over the database at `db_path`
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    fn connect(&self) -> LivrariaResult<Connection> {
        Connection::open(&self.db_path).map_err(|e| {
            LivrariaError::Storage(format!("Failed to open {}: {}", self.db_path.display(), e))
        })
    }

    fn parse_book_row(row: &Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: BookId::new(row.get(0)?),
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get::<_, Option<i32>>(3)?.unwrap_or_default(),
            price: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
        })
    }

    /// Insert a new book, letting the store assign the identifier
    pub fn insert(&self, book: &NewBook) -> LivrariaResult<BookId> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4)",
            params![book.title, book.author, book.year, book.price],
        )?;
        Ok(BookId::new(conn.last_insert_rowid()))
    }

    /// Insert a book keeping its own identifier
    ///
    /// Returns `false` without touching the store when the id is taken.
    pub fn insert_or_ignore(&self, book: &Book) -> LivrariaResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO livros (id, titulo, autor, ano_publicacao, preco)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![book.id.value(), book.title, book.author, book.year, book.price],
        )?;
        Ok(changed > 0)
    }

    /// Get a book by ID
    pub fn get(&self, id: BookId) -> LivrariaResult<Option<Book>> {
        let conn = self.connect()?;
        let book = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_BOOK),
                params![id.value()],
                Self::parse_book_row,
            )
            .optional()?;
        Ok(book)
    }

    /// Get all books in ascending identifier order
    pub fn get_all(&self) -> LivrariaResult<Vec<Book>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_BOOK))?;
        let books = stmt
            .query_map([], Self::parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Books whose author contains `needle`, ignoring case
    ///
    /// SQLite's LIKE only folds ASCII, so matching happens here with full
    /// Unicode lowercasing ("frança" matches "FRANÇA").
    pub fn search_by_author(&self, needle: &str) -> LivrariaResult<Vec<Book>> {
        let needle = needle.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.author.to_lowercase().contains(&needle))
            .collect())
    }

    /// Set the price of a book; `false` if no such book
    pub fn update_price(&self, id: BookId, price: f64) -> LivrariaResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE livros SET preco = ?1 WHERE id = ?2",
            params![price, id.value()],
        )?;
        Ok(changed > 0)
    }

    /// Delete a book; `false` if no such book
    pub fn delete(&self, id: BookId) -> LivrariaResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM livros WHERE id = ?1", params![id.value()])?;
        Ok(changed > 0)
    }

    /// Count books
    pub fn count(&self) -> LivrariaResult<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
