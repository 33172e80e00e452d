//! Database File Format Tests
//!
//! Covers the text format end to end through the file system:
//! - serialized databases re-parse to the same records
//! - grammar violations are reported with their line
//! - append leaves existing bytes untouched
//! - rewrite preserves record order

use studentdb::record::StudentRecord;
use studentdb::storage::{
    load_database, parse_database, serialize_database, Layout, StorageErrorCode, StorageWriter,
};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const COMPUTING: &str = "\
#RECORD
 #SID
     12345
 #NAME
     Sam Eold
 #ENROLLMENTS
     COMP101 COMP110
 #GRADES
     40.5 55.6
 #PHONE
     44-1234-456123
#RECORD
 #SID
     13579
 #NAME
     Les Sismore
 #ENROLLMENTS
     COMP101 COMP110 COMP123
";

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn jo_king() -> StudentRecord {
    let mut record = StudentRecord::new(24680, "Jo King");
    record.enrol("COMP101", Some(40.5));
    record.enrol("COMP145", None);
    record.set_phone("00-12-34567");
    record
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_sample_database() {
    let records = parse_database(COMPUTING).unwrap();
    assert_eq!(records.len(), 2);

    let sam = &records[0];
    assert_eq!(sam.student_id, 12345);
    assert_eq!(sam.name, "Sam Eold");
    assert_eq!(sam.enrollments, vec!["COMP101", "COMP110"]);
    assert_eq!(sam.grades, vec![Some(40.5), Some(55.6)]);
    assert_eq!(sam.phone.as_deref(), Some("44-1234-456123"));

    let les = &records[1];
    assert_eq!(les.student_id, 13579);
    assert!(les.grades.is_empty());
    assert_eq!(les.phone, None);
}

#[test]
fn test_indentation_and_blank_lines_are_ignored() {
    let text = "\n\n#RECORD\n#SID\n\t1\n\n   #NAME   \nAl Bo\n\n";
    let records = parse_database(text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Al Bo");
}

#[test]
fn test_empty_file_is_empty_database() {
    assert!(parse_database("").unwrap().is_empty());
    assert!(parse_database("\n   \n").unwrap().is_empty());
}

#[test]
fn test_missing_record_tag_is_malformed() {
    let err = parse_database("#SID\n12345\n").unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::MalformedFile);
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_unknown_tag_is_malformed() {
    let err = parse_database("#RECORD\n#SID\n1\n#EMAIL\nx@y\n").unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_value_where_tag_expected_is_malformed() {
    let err = parse_database("#RECORD\n#SID\n1\nstray value\n").unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_tag_without_value_at_end_is_malformed() {
    let err = parse_database("#RECORD\n#SID\n1\n#NAME\n").unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_non_numeric_values_are_malformed() {
    assert!(parse_database("#RECORD\n#SID\nabc\n").unwrap_err().is_malformed());
    assert!(parse_database("#RECORD\n#SID\n1\n#GRADES\n40.5 high\n")
        .unwrap_err()
        .is_malformed());
}

#[test]
fn test_duplicate_ids_parse() {
    let text = "#RECORD\n#SID\n1\n#NAME\nAl Bo\n#RECORD\n#SID\n1\n#NAME\nCy Do\n";
    let records = parse_database(text).unwrap();
    assert_eq!(records.len(), 2);
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_serialized_database_reparses_identically() {
    let records = parse_database(COMPUTING).unwrap();
    let mut all = records.clone();
    all.push(jo_king());

    let text = serialize_database(&all);
    assert_eq!(parse_database(&text).unwrap(), all);
}

// =============================================================================
// Writer
// =============================================================================

#[test]
fn test_append_keeps_existing_bytes() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("computing.txt");
    fs::write(&path, COMPUTING).unwrap();

    let writer = StorageWriter::new(&path, Layout::default());
    writer.append(&jo_king()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(COMPUTING));

    let db = load_database(&path).unwrap();
    assert_eq!(db.len(), 3);
    assert_eq!(db.find(24680), Some(&jo_king()));
}

#[test]
fn test_append_after_missing_final_newline() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("computing.txt");
    fs::write(&path, COMPUTING.trim_end()).unwrap();

    StorageWriter::new(&path, Layout::default())
        .append(&jo_king())
        .unwrap();

    let db = load_database(&path).unwrap();
    assert_eq!(db.len(), 3);
    assert_eq!(db.records()[1].enrollments.len(), 3);
}

#[test]
fn test_rewrite_preserves_order() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("computing.txt");
    fs::write(&path, COMPUTING).unwrap();

    let mut db = load_database(&path).unwrap();
    db.find_mut(12345).unwrap().set_name("Sam Eoldest");

    let writer = StorageWriter::new(&path, Layout::default());
    writer.rewrite(&db).unwrap();

    let reloaded = load_database(&path).unwrap();
    let ids: Vec<u64> = reloaded.iter().map(|r| r.student_id).collect();
    assert_eq!(ids, vec![12345, 13579]);
    assert_eq!(reloaded.find(12345).unwrap().name, "Sam Eoldest");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = create_temp_data_dir();
    let err = load_database(&temp_dir.path().join("absent.txt")).unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::IoError);
    assert!(err.is_not_found());
}
