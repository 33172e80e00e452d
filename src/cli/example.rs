//! Example database generation
//!
//! Running any tool with no arguments writes a small sample database so the
//! other commands have something to work on. An existing file is left alone.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::record::StudentRecord;
use crate::storage::{serialize_database_with, Layout};

use super::errors::{CliError, CliResult};

/// Outcome of `write_example_database`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleOutcome {
    Written,
    AlreadyExists,
}

/// Records in the example database
pub fn example_records() -> Vec<StudentRecord> {
    let mut sam = StudentRecord::new(12345, "Sam Eold");
    sam.enrol("COMP101", Some(40.5));
    sam.enrol("COMP110", Some(55.6));
    sam.set_phone("44-1234-456123");

    let mut les = StudentRecord::new(13579, "Les Sismore");
    for code in ["COMP101", "COMP110", "COMP123", "COMP145", "COMP165"] {
        les.enrol(code, None);
    }

    let mut jo = StudentRecord::new(24680, "Jo King");
    let modules = [
        ("COMP101", 40.5),
        ("COMP110", 55.6),
        ("COMP123", 35.7),
        ("COMP145", 67.5),
        ("COMP165", 80.1),
    ];
    for (code, grade) in modules {
        jo.enrol(code, Some(grade));
    }
    jo.set_phone("00-12-34567");

    vec![sam, les, jo]
}

/// Writes the example database to `path` unless a file is already there.
pub fn write_example_database(path: &Path, layout: Layout) -> CliResult<ExampleOutcome> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(ExampleOutcome::AlreadyExists),
        Err(e) => {
            return Err(CliError::io_error(format!(
                "Cannot create example database {}: {}",
                path.display(),
                e
            )))
        }
    };

    let text = serialize_database_with(&example_records(), layout);
    file.write_all(text.as_bytes())?;
    file.sync_all()?;

    Ok(ExampleOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_database;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_example_database_parses() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("computing.txt");

        let outcome = write_example_database(&path, Layout::default()).unwrap();
        assert_eq!(outcome, ExampleOutcome::Written);

        let db = load_database(&path).unwrap();
        assert_eq!(db.into_records(), example_records());
    }

    #[test]
    fn test_example_database_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("computing.txt");
        fs::write(&path, "#RECORD\n#SID\n1\n").unwrap();

        let outcome = write_example_database(&path, Layout::default()).unwrap();
        assert_eq!(outcome, ExampleOutcome::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "#RECORD\n#SID\n1\n");
    }

    #[test]
    fn test_example_records_are_valid() {
        for record in example_records() {
            assert!(record.validate().is_ok());
        }
    }
}
