//! Database file reader
//!
//! The whole file is read in one pass and the handle is released before
//! parsing starts.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::record::Database;

use super::errors::{StorageError, StorageResult};
use super::parser::parse_database;

/// Reader holding the text of one database file.
pub struct StorageReader {
    /// Path the text was read from
    storage_path: PathBuf,
    /// Full file contents
    text: String,
}

impl StorageReader {
    /// Reads the database file at `storage_path`.
    ///
    /// A missing file is an `STUDENTDB_IO_ERROR` whose `is_not_found()` is
    /// true; callers that allow creating the file check for it first.
    pub fn open(storage_path: &Path) -> StorageResult<Self> {
        let mut text = String::new();
        {
            let mut file = File::open(storage_path).map_err(|e| {
                StorageError::io_error(
                    format!("Cannot open database file {}", storage_path.display()),
                    e,
                )
            })?;
            file.read_to_string(&mut text).map_err(|e| {
                StorageError::io_error(
                    format!("Cannot read database file {}", storage_path.display()),
                    e,
                )
            })?;
        }

        Ok(Self {
            storage_path: storage_path.to_path_buf(),
            text,
        })
    }

    /// Returns the storage file path.
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Parses every record in the file.
    pub fn read_all(&self) -> StorageResult<Database> {
        parse_database(&self.text).map(Database::from_records)
    }
}

/// Opens and parses the database at `path`.
pub fn load_database(path: &Path) -> StorageResult<Database> {
    StorageReader::open(path)?.read_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = StorageReader::open(&temp_dir.path().join("absent.txt"));

        let err = result.err().unwrap();
        assert!(err.is_not_found());
        assert_eq!(err.code().code(), "STUDENTDB_IO_ERROR");
    }

    #[test]
    fn test_empty_file_is_empty_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let db = load_database(&path).unwrap();
        assert!(db.is_empty());
    }

    #[test]
    fn test_read_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.txt");
        fs::write(&path, "#RECORD\n #SID\n     1\n #NAME\n     Ann Lee\n").unwrap();

        let reader = StorageReader::open(&path).unwrap();
        assert_eq!(reader.path(), path.as_path());
        let db = reader.read_all().unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.find(1).unwrap().name, "Ann Lee");
    }

    #[test]
    fn test_malformed_file_reports_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.txt");
        fs::write(&path, "\n#SID\n1\n").unwrap();

        let err = load_database(&path).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.line(), Some(2));
    }
}
