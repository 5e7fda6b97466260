//! Export and import CLI commands
//!
//! Both commands work on the exports directory by default: a bare file name
//! such as `livros.csv` is looked up there, anything with a directory part is
//! used as given.

use std::path::{Path, PathBuf};

use crate::config::paths::LivrariaPaths;
use crate::config::settings::Settings;
use crate::display::summary::format_import_result;
use crate::error::LivrariaResult;
use crate::export::export_all;
use crate::services::{ImportResult, ImportService};
use crate::storage::Storage;

/// Export the whole catalog, returning the destination and row count
pub fn run_export(
    storage: &Storage,
    settings: &Settings,
    output: Option<&str>,
) -> LivrariaResult<(PathBuf, usize)> {
    let destination = resolve_exchange_path(
        storage.paths(),
        output.unwrap_or(settings.export_filename.as_str()),
    );
    let count = export_all(storage, &destination)?;
    Ok((destination, count))
}

/// Import a CSV file into the catalog
pub fn run_import(storage: &Storage, file: &str) -> LivrariaResult<ImportResult> {
    let source = resolve_exchange_path(storage.paths(), file);
    ImportService::new(storage).import_file(&source)
}

/// Handle the `export` command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    output: Option<String>,
) -> LivrariaResult<()> {
    let (destination, count) = run_export(storage, settings, output.as_deref())?;
    if count == 0 {
        println!("The catalog is empty; wrote header only.");
    }
    println!("Exported {} book(s) to: {}", count, destination.display());
    Ok(())
}

/// Handle the `import` command
pub fn handle_import_command(storage: &Storage, file: String) -> LivrariaResult<()> {
    let result = run_import(storage, &file)?;
    print!("{}", format_import_result(&result));
    Ok(())
}

/// Resolve a user-supplied exchange file name
pub fn resolve_exchange_path(paths: &LivrariaPaths, file: &str) -> PathBuf {
    let path = Path::new(file);
    let is_bare_name = path.is_relative() && path.components().count() == 1;

    if is_bare_name {
        paths.export_file(file)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::BookService;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_exchange_path() {
        let paths = LivrariaPaths::with_base_dir("/srv/livraria");

        assert_eq!(
            resolve_exchange_path(&paths, "livros.csv"),
            PathBuf::from("/srv/livraria/exports/livros.csv")
        );
        assert_eq!(
            resolve_exchange_path(&paths, "other/livros.csv"),
            PathBuf::from("other/livros.csv")
        );
        assert_eq!(
            resolve_exchange_path(&paths, "/tmp/livros.csv"),
            PathBuf::from("/tmp/livros.csv")
        );
    }

    #[test]
    fn test_export_then_import_by_bare_name() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(LivrariaPaths::with_base_dir(temp_dir.path())).unwrap();
        let settings = Settings::default();
        BookService::new(&storage)
            .create("Dom Casmurro", "Machado de Assis", 1899, 29.9)
            .unwrap();

        let (destination, count) = run_export(&storage, &settings, None).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            destination,
            storage.paths().exports_dir().join("livros_exportados.csv")
        );

        // Same store: the only row is a duplicate
        let result = run_import(&storage, "livros_exportados.csv").unwrap();
        assert_eq!(result.imported, 0);
        assert_eq!(result.duplicates_skipped, 1);
    }
}
