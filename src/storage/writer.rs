//! Database file writer
//!
//! Two write paths:
//! - append: one new record at the end of the file, existing bytes untouched
//! - rewrite: the whole database replaces the file contents
//!
//! Neither path locks the file or renames atomically; concurrent writers
//! must be serialized by the caller.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::record::{Database, StudentRecord};

use super::errors::{StorageError, StorageResult};
use super::serializer::{serialize_database_with, serialize_record, Layout};

/// Writer bound to one database file.
pub struct StorageWriter {
    /// Path to the storage file
    storage_path: PathBuf,
    /// Indentation used for new text
    layout: Layout,
}

impl StorageWriter {
    pub fn new(storage_path: &Path, layout: Layout) -> Self {
        Self {
            storage_path: storage_path.to_path_buf(),
            layout,
        }
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Creates an empty database file if none exists.
    ///
    /// Returns `true` when a file was created. Existing contents are never
    /// truncated.
    pub fn create_if_missing(&self) -> StorageResult<bool> {
        if self.storage_path.exists() {
            return Ok(false);
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.storage_path)
            .map_err(|e| {
                StorageError::io_error(
                    format!("Cannot create database file {}", self.storage_path.display()),
                    e,
                )
            })?;

        Ok(true)
    }

    /// Appends one record to the end of the file.
    ///
    /// A newline is inserted first if the existing text does not end with
    /// one, so the new `#RECORD` tag starts its own line.
    pub fn append(&self, record: &StudentRecord) -> StorageResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.storage_path)
            .map_err(|e| {
                StorageError::io_error(
                    format!(
                        "Cannot open database file {} for appending",
                        self.storage_path.display()
                    ),
                    e,
                )
            })?;

        let mut text = String::new();
        if self.needs_separator(&mut file)? {
            text.push('\n');
        }
        text.push_str(&serialize_record(record, self.layout));

        self.write_and_sync(&mut file, &text)
    }

    /// Replaces the file contents with `db`.
    pub fn rewrite(&self, db: &Database) -> StorageResult<()> {
        let mut file = File::create(&self.storage_path).map_err(|e| {
            StorageError::io_error(
                format!(
                    "Cannot open database file {} for writing",
                    self.storage_path.display()
                ),
                e,
            )
        })?;

        let text = serialize_database_with(db, self.layout);
        self.write_and_sync(&mut file, &text)
    }

    fn needs_separator(&self, file: &mut File) -> StorageResult<bool> {
        let len = file
            .metadata()
            .map_err(|e| StorageError::io_error("Failed to read file metadata", e))?
            .len();
        if len == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| {
                StorageError::io_error(
                    format!("Cannot read database file {}", self.storage_path.display()),
                    e,
                )
            })?;

        Ok(last[0] != b'\n')
    }

    fn write_and_sync(&self, file: &mut File, text: &str) -> StorageResult<()> {
        file.write_all(text.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                StorageError::io_error(
                    format!("Failed to write database file {}", self.storage_path.display()),
                    e,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::reader::load_database;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn writer_in(temp_dir: &TempDir) -> StorageWriter {
        StorageWriter::new(&temp_dir.path().join("db.txt"), Layout::default())
    }

    #[test]
    fn test_create_if_missing() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(&temp_dir);

        assert!(writer.create_if_missing().unwrap());
        assert!(writer.path().exists());
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "");

        fs::write(writer.path(), "#RECORD\n").unwrap();
        assert!(!writer.create_if_missing().unwrap());
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "#RECORD\n");
    }

    #[test]
    fn test_append_keeps_existing_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(&temp_dir);
        let existing = "#RECORD\n  #SID\n  1\n  #NAME\n  Ann Lee\n";
        fs::write(writer.path(), existing).unwrap();

        writer.append(&StudentRecord::new(2, "Bob Ray")).unwrap();

        let text = fs::read_to_string(writer.path()).unwrap();
        assert!(text.starts_with(existing));
        let db = load_database(writer.path()).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.find(2).unwrap().name, "Bob Ray");
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(&temp_dir);
        fs::write(writer.path(), "#RECORD\n#SID\n1\n#NAME\nAnn Lee").unwrap();

        writer.append(&StudentRecord::new(2, "Bob Ray")).unwrap();

        let db = load_database(writer.path()).unwrap();
        assert_eq!(db.find(1).unwrap().name, "Ann Lee");
        assert_eq!(db.find(2).unwrap().name, "Bob Ray");
    }

    #[test]
    fn test_append_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(&temp_dir);

        writer.append(&StudentRecord::new(5, "Eve Moss")).unwrap();

        let text = fs::read_to_string(writer.path()).unwrap();
        assert!(text.starts_with("#RECORD\n"));
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(&temp_dir);
        fs::write(writer.path(), "#RECORD\n#SID\n1\n#NAME\nOld Name\n").unwrap();

        let db = Database::from_records(vec![StudentRecord::new(1, "New Name")]);
        writer.rewrite(&db).unwrap();

        assert_eq!(load_database(writer.path()).unwrap(), db);
    }
}
