//! Book service
//!
//! Business logic for the catalog: validation of incoming values, CRUD
//! against the repository and audit logging of every change.

use crate::audit::{book_diff, EntityType};
use crate::error::LivrariaResult;
use crate::models::book::validate_price;
use crate::models::{Book, BookId, NewBook};
use crate::storage::Storage;

/// Service for book management
pub struct BookService<'a> {
    storage: &'a Storage,
}

impl<'a> BookService<'a> {
    /// Create a new book service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a book to the catalog
    ///
    /// Rejects empty title/author, out-of-range years and negative prices
    /// with a validation error, leaving the store untouched. Once the row is
    /// committed the call succeeds, even if the audit entry can't be written.
    pub fn create(&self, title: &str, author: &str, year: i32, price: f64) -> LivrariaResult<Book> {
        let new_book = NewBook::new(title, author, year, price);
        new_book.validate()?;

        let id = self.storage.books.insert(&new_book)?;
        let book = Book::from_new(id, new_book);

        self.storage.log_create(
            EntityType::Book,
            book.id.to_string(),
            Some(book.title.clone()),
            &book,
        );

        Ok(book)
    }

    /// Get a book by ID
    pub fn get(&self, id: BookId) -> LivrariaResult<Option<Book>> {
        self.storage.books.get(id)
    }

    /// All books, ascending by identifier
    pub fn list(&self) -> LivrariaResult<Vec<Book>> {
        self.storage.books.get_all()
    }

    /// Books whose author contains `query` (case-insensitive)
    pub fn search_by_author(&self, query: &str) -> LivrariaResult<Vec<Book>> {
        self.storage.books.search_by_author(query.trim())
    }

    /// Change the price of a book
    ///
    /// Returns `Ok(false)` when the book doesn't exist.
    pub fn update_price(&self, id: BookId, new_price: f64) -> LivrariaResult<bool> {
        validate_price(new_price)?;

        let before = match self.storage.books.get(id)? {
            Some(book) => book,
            None => return Ok(false),
        };

        if !self.storage.books.update_price(id, new_price)? {
            return Ok(false);
        }

        let after = Book {
            price: new_price,
            ..before.clone()
        };
        self.storage.log_update(
            EntityType::Book,
            id.to_string(),
            Some(after.title.clone()),
            &before,
            &after,
            book_diff(&before, &after),
        );

        Ok(true)
    }

    /// Remove a book from the catalog
    ///
    /// Returns `Ok(false)` when the book doesn't exist.
    pub fn delete(&self, id: BookId) -> LivrariaResult<bool> {
        let book = match self.storage.books.get(id)? {
            Some(book) => book,
            None => return Ok(false),
        };

        if !self.storage.books.delete(id)? {
            return Ok(false);
        }

        self.storage.log_delete(
            EntityType::Book,
            id.to_string(),
            Some(book.title.clone()),
            &book,
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LivrariaPaths;
    use crate::error::LivrariaError;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_catalog_lifecycle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);

        let book = service
            .create("Dom Casmurro", "Machado de Assis", 1899, 29.90)
            .unwrap();
        assert_eq!(book.id, BookId::new(1));

        let books = service.list().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0], book);

        assert!(service.update_price(book.id, 24.90).unwrap());
        assert_eq!(service.list().unwrap()[0].price, 24.90);

        assert!(service.delete(book.id).unwrap());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_ids_pairwise_distinct_and_increasing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);

        let ids: Vec<_> = (0..10)
            .map(|i| {
                service
                    .create(&format!("Livro {}", i), "Autor", 2000, 10.0)
                    .unwrap()
                    .id
            })
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);

        let err = service.create("  ", "Autor", 2000, 10.0).unwrap_err();
        assert!(err.is_validation());

        let err = service.create("Título", "", 2000, 10.0).unwrap_err();
        assert!(err.is_validation());

        let err = service.create("Título", "Autor", 2000, -3.0).unwrap_err();
        assert!(matches!(err, LivrariaError::Validation(_)));

        assert_eq!(storage.books.count().unwrap(), 0);
        assert_eq!(storage.audit().entry_count().unwrap(), 0);
    }

    #[test]
    fn test_not_found_leaves_store_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);
        service.create("Helena", "Machado de Assis", 1876, 19.0).unwrap();
        let before = service.list().unwrap();

        assert!(!service.update_price(BookId::new(99), 5.0).unwrap());
        assert!(!service.delete(BookId::new(99)).unwrap());

        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn test_update_price_rejects_negative() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);
        let book = service.create("Helena", "Machado de Assis", 1876, 19.0).unwrap();

        assert!(service.update_price(book.id, -1.0).unwrap_err().is_validation());
        assert_eq!(service.get(book.id).unwrap().unwrap().price, 19.0);
    }

    #[test]
    fn test_search_by_author() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);
        service.create("Os Maias", "Eça de Queirós - França", 1888, 35.0).unwrap();
        service.create("Almanaque", "FRANÇA LITERÁRIA", 1900, 12.0).unwrap();
        service.create("Dom Casmurro", "Machado de Assis", 1899, 29.9).unwrap();

        let found = service.search_by_author("frança").unwrap();
        let titles: Vec<_> = found.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Os Maias", "Almanaque"]);

        assert!(service.search_by_author("Tolstói").unwrap().is_empty());
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BookService::new(&storage);

        let book = service.create("Helena", "Machado de Assis", 1876, 19.0).unwrap();
        service.update_price(book.id, 21.0).unwrap();
        service.delete(book.id).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("price: 19.00 -> 21.00")
        );
    }

    #[test]
    fn test_audit_failure_does_not_fail_committed_changes() {
        let (_temp_dir, storage) = create_test_storage();
        std::fs::create_dir(storage.paths().audit_log()).unwrap();
        let service = BookService::new(&storage);

        let book = service.create("Helena", "Machado de Assis", 1876, 19.0).unwrap();
        assert_eq!(storage.books.count().unwrap(), 1);

        assert!(service.update_price(book.id, 21.0).unwrap());
        assert!(service.delete(book.id).unwrap());
        assert_eq!(storage.books.count().unwrap(), 0);

        let failures = storage.take_audit_failures();
        assert_eq!(failures.len(), 3);
        assert!(failures[0].starts_with("CREATE Book 1"));
    }
}
