//! File I/O utilities with atomic writes
//!
//! Exported CSV files and backup snapshots are written to a temporary file in
//! the destination directory and renamed into place, so a failure never leaves
//! a half-written file under the final name.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LivrariaError, LivrariaResult};

/// Temporary sibling used while `path` is being written
///
/// Hidden (leading dot) so directory scans for real artifacts skip it.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "livraria".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Write a file atomically (write to temp, then rename)
///
/// `write_fn` receives a buffered writer over the temporary file. Whatever it
/// returns is passed back to the caller once the file is in place.
pub fn write_atomic<P, T, F>(path: P, write_fn: F) -> LivrariaResult<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> LivrariaResult<T>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, write_fn).and_then(|value| {
        fs::rename(&temp_path, path).map_err(|e| {
            LivrariaError::Io(format!(
                "Failed to move {} into place: {}",
                path.display(),
                e
            ))
        })?;
        Ok(value)
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<T, F>(temp_path: &Path, write_fn: F) -> LivrariaResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> LivrariaResult<T>,
{
    let file = File::create(temp_path)
        .map_err(|e| LivrariaError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let value = write_fn(&mut writer)?;

    writer
        .flush()
        .map_err(|e| LivrariaError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LivrariaError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(value)
}

/// Copy `source` to `dest` byte-for-byte, all or nothing
///
/// Returns the number of bytes copied.
pub fn copy_atomic(source: &Path, dest: &Path) -> LivrariaResult<u64> {
    ensure_parent(dest)?;

    let temp_path = temp_path_for(dest);
    let result = fs::copy(source, &temp_path)
        .map_err(|e| {
            LivrariaError::Io(format!("Failed to copy {}: {}", source.display(), e))
        })
        .and_then(|bytes| {
            File::open(&temp_path)
                .and_then(|f| f.sync_all())
                .map_err(|e| LivrariaError::Io(format!("Failed to sync copy: {}", e)))?;
            fs::rename(&temp_path, dest).map_err(|e| {
                LivrariaError::Io(format!(
                    "Failed to move {} into place: {}",
                    dest.display(),
                    e
                ))
            })?;
            Ok(bytes)
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn ensure_parent(path: &Path) -> LivrariaResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LivrariaError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let written = write_atomic(&path, |w| {
            w.write_all(b"a,b\n")?;
            Ok(4)
        })
        .unwrap();

        assert_eq!(written, 4);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_atomic_failure_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "old").unwrap();

        let result: LivrariaResult<()> = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(LivrariaError::Export("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.csv");

        write_atomic(&path, |_| Ok(())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_copy_atomic() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.db");
        let dest = temp_dir.path().join("copy.db");
        fs::write(&source, [0u8, 1, 2, 3]).unwrap();

        let bytes = copy_atomic(&source, &dest).unwrap();
        assert_eq!(bytes, 4);
        assert_eq!(fs::read(&dest).unwrap(), vec![0u8, 1, 2, 3]);
    }

    #[test]
    fn test_copy_atomic_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("copy.db");

        assert!(copy_atomic(&temp_dir.path().join("missing.db"), &dest).is_err());
        assert!(!dest.exists());
        assert!(!temp_path_for(&dest).exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let path = Path::new("/tmp/exports/livros.csv");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/tmp/exports/.livros.csv.tmp")
        );
    }
}
