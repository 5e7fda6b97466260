//! CSV import service
//!
//! Reads an exchange file produced by [`crate::export::export_all`] (or a
//! compatible one) back into the catalog. Each row keeps its own identifier
//! and is inserted with insert-or-ignore semantics, so existing books always
//! win. Bad rows are counted and skipped; they never abort the import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use serde::Serialize;

use crate::audit::{EntityType, Operation};
use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{parse_price, parse_year, Book, BookId};
use crate::storage::Storage;

/// Minimum number of fields in a data row
pub const MIN_FIELDS: usize = 5;

/// Result of a completed import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    /// Number of books inserted
    pub imported: usize,
    /// Rows whose identifier already existed
    pub duplicates_skipped: usize,
    /// Rows that could not be parsed or validated
    pub malformed: usize,
    /// Identifiers of the inserted books
    pub imported_ids: Vec<BookId>,
    /// Reason for each malformed row, keyed by 1-based data row number
    pub error_messages: Vec<(usize, String)>,
}

impl ImportResult {
    /// Total rows not imported
    pub fn skipped(&self) -> usize {
        self.duplicates_skipped + self.malformed
    }

    fn record_error(&mut self, row: usize, message: String) {
        self.malformed += 1;
        self.error_messages.push((row, message));
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import every data row of the CSV file at `path`
    pub fn import_file(&self, path: &Path) -> LivrariaResult<ImportResult> {
        if !path.is_file() {
            return Err(LivrariaError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            LivrariaError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let result = self.import_from_reader(&mut reader)?;

        self.storage.log_lifecycle(
            Operation::Import,
            EntityType::Catalog,
            path.display().to_string(),
            &result,
            format!(
                "{} imported, {} duplicate(s), {} malformed",
                result.imported, result.duplicates_skipped, result.malformed
            ),
        );

        Ok(result)
    }

    /// Import from an already-configured reader (header handled by the reader)
    pub fn import_from_reader<R: Read>(
        &self,
        reader: &mut Reader<R>,
    ) -> LivrariaResult<ImportResult> {
        let mut result = ImportResult::default();

        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    result.record_error(row, format!("Error reading CSV record: {}", e));
                    continue;
                }
            };

            let book = match parse_record(&record) {
                Ok(book) => book,
                Err(message) => {
                    result.record_error(row, message);
                    continue;
                }
            };

            if self.storage.books.insert_or_ignore(&book)? {
                result.imported += 1;
                result.imported_ids.push(book.id);
            } else {
                result.duplicates_skipped += 1;
            }
        }

        Ok(result)
    }
}

/// Turn one CSV record into a validated book
fn parse_record(record: &StringRecord) -> Result<Book, String> {
    if record.len() < MIN_FIELDS {
        return Err(format!(
            "Expected {} fields, found {}",
            MIN_FIELDS,
            record.len()
        ));
    }

    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let id: i64 = field(0)
        .parse()
        .map_err(|_| format!("Invalid id: '{}'", field(0)))?;
    if id < 1 {
        return Err(format!("Invalid id: '{}'", id));
    }

    let year = parse_year(field(3)).map_err(|e| e.to_string())?;
    let price = parse_price(field(4)).map_err(|e| e.to_string())?;

    let book = Book {
        id: BookId::new(id),
        title: field(1).to_string(),
        author: field(2).to_string(),
        year,
        price,
    };
    book.validate().map_err(|e| e.to_string())?;

    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LivrariaPaths;
    use crate::export::export_all;
    use crate::services::BookService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn write_csv(storage: &Storage, name: &str, content: &str) -> std::path::PathBuf {
        let path = storage.paths().export_file(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_round_trip_into_empty_store() {
        let (_src_dir, source) = create_test_storage();
        let service = BookService::new(&source);
        service.create("Dom Casmurro", "Machado de Assis", 1899, 29.9).unwrap();
        service.create("Os Maias", "Eça de Queirós", 1888, 35.5).unwrap();
        service
            .create("Memórias, \"Póstumas\"", "Assis, Machado", 1881, 0.0)
            .unwrap();
        service.delete(BookId::new(2)).unwrap();

        let file = source.paths().export_file("livros_exportados.csv");
        export_all(&source, &file).unwrap();

        let (_dst_dir, target) = create_test_storage();
        let result = ImportService::new(&target).import_file(&file).unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped(), 0);
        assert_eq!(
            target.books.get_all().unwrap(),
            source.books.get_all().unwrap()
        );
    }

    #[test]
    fn test_existing_ids_win() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);
        service.create("Original", "Autor", 2000, 10.0).unwrap();

        let path = write_csv(
            &storage,
            "in.csv",
            "ID,Título,Autor,Ano,Preço\n1,Substituto,Outro,1990,99.0\n2,Novo,Autor,2001,5.0\n",
        );
        let result = ImportService::new(&storage).import_file(&path).unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(result.duplicates_skipped, 1);
        assert_eq!(result.skipped(), 1);

        let existing = storage.books.get(BookId::new(1)).unwrap().unwrap();
        assert_eq!(existing.title, "Original");
        assert_eq!(existing.price, 10.0);
    }

    #[test]
    fn test_short_row_skipped() {
        let (_temp_dir, storage) = create_test_storage();
        let path = write_csv(
            &storage,
            "in.csv",
            "ID,Título,Autor,Ano,Preço\n1,A,X,2000,1.0\n2,B,Y\n3,C,Z,2002,3.0\n",
        );

        let result = ImportService::new(&storage).import_file(&path).unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.malformed, 1);
        assert_eq!(result.error_messages[0].0, 2);
        assert_eq!(storage.books.count().unwrap(), 2);
    }

    #[test]
    fn test_non_numeric_fields_skipped() {
        let (_temp_dir, storage) = create_test_storage();
        let path = write_csv(
            &storage,
            "in.csv",
            "ID,Título,Autor,Ano,Preço\n\
             x,A,X,2000,1.0\n\
             2,B,Y,dois mil,1.0\n\
             3,C,Z,2000,caro\n\
             4,,Z,2000,1.0\n\
             5,E,W,2000,-1\n\
             6,F,V,2000,\"12,50\"\n",
        );

        let result = ImportService::new(&storage).import_file(&path).unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(result.malformed, 5);
        assert_eq!(
            storage.books.get(BookId::new(6)).unwrap().unwrap().price,
            12.5
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let (_temp_dir, storage) = create_test_storage();
        let path = write_csv(
            &storage,
            "in.csv",
            "ID,Título,Autor,Ano,Preço,Notas\n7,A,X,2000,1.0,estante 3\n",
        );

        let result = ImportService::new(&storage).import_file(&path).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.imported_ids, vec![BookId::new(7)]);
    }

    #[test]
    fn test_created_ids_continue_after_import() {
        let (_temp_dir, storage) = create_test_storage();
        let path = write_csv(&storage, "in.csv", "ID,Título,Autor,Ano,Preço\n40,A,X,2000,1.0\n");
        ImportService::new(&storage).import_file(&path).unwrap();

        let book = BookService::new(&storage)
            .create("Depois", "Autor", 2020, 1.0)
            .unwrap();
        assert_eq!(book.id, BookId::new(41));
    }

    #[test]
    fn test_missing_file() {
        let (temp_dir, storage) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_file(&temp_dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LivrariaError::Import(_)));
    }

    #[test]
    fn test_header_only_file() {
        let (_temp_dir, storage) = create_test_storage();
        let path = write_csv(&storage, "in.csv", "ID,Título,Autor,Ano,Preço\n");

        let result = ImportService::new(&storage).import_file(&path).unwrap();
        assert_eq!(result.imported, 0);
        assert_eq!(result.skipped(), 0);
    }
}
