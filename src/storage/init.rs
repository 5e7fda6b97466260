//! Storage initialization
//!
//! Creates the directory layout and the catalog table on first run. Both
//! steps are idempotent.

use rusqlite::Connection;

use crate::config::paths::LivrariaPaths;
use crate::error::LivrariaError;

/// Name of the catalog table
pub const BOOKS_TABLE: &str = "livros";

const CREATE_BOOKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS livros (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        titulo TEXT NOT NULL,
        autor TEXT NOT NULL,
        ano_publicacao INTEGER,
        preco REAL
    )";

/// Initialize storage for a fresh or existing installation
pub fn initialize_storage(paths: &LivrariaPaths) -> Result<(), LivrariaError> {
    paths.ensure_directories()?;

    let conn = Connection::open(paths.database_file()).map_err(|e| {
        LivrariaError::Storage(format!(
            "Failed to open {}: {}",
            paths.database_file().display(),
            e
        ))
    })?;
    create_schema(&conn)
}

/// Declare the catalog schema (create-if-not-exists)
pub fn create_schema(conn: &Connection) -> Result<(), LivrariaError> {
    conn.execute(CREATE_BOOKS_TABLE, [])
        .map_err(|e| LivrariaError::Storage(format!("Failed to create table: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_exists(paths: &LivrariaPaths) -> bool {
        let conn = Connection::open(paths.database_file()).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [BOOKS_TABLE],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path());

        assert!(!paths.database_file().exists());
        initialize_storage(&paths).unwrap();

        assert!(paths.database_file().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.exports_dir().exists());
        assert!(table_exists(&paths));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path());
        initialize_storage(&paths).unwrap();

        let conn = Connection::open(paths.database_file()).unwrap();
        conn.execute(
            "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES ('A', 'B', 2000, 1.0)",
            [],
        )
        .unwrap();
        drop(conn);

        initialize_storage(&paths).unwrap();

        let conn = Connection::open(paths.database_file()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
