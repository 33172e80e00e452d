//! Record file storage
//!
//! The database is a flat text file of tag-delimited records. This module
//! converts between that text and `record::Database`, and owns every file
//! access.
//!
//! # Design Principles
//!
//! - Parse before mutate: a malformed file aborts the operation before any
//!   write
//! - Serializer output always re-parses to the same records
//! - Add appends one record; Update rewrites the whole file
//! - File handles are scoped to a single read or write

mod errors;
mod parser;
mod reader;
mod serializer;
mod tag;
mod writer;

pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use parser::{parse_database, UNGRADED_MARKER};
pub use reader::{load_database, StorageReader};
pub use serializer::{serialize_database, serialize_database_with, serialize_record, Layout};
pub use tag::Tag;
pub use writer::StorageWriter;
