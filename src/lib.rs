//! studentdb - a tag-delimited flat-file student record database
//!
//! Records are kept in a plain text file, one field tag per line followed by
//! its value. The library parses and writes that format, validates fields and
//! implements the query, add and update operations behind the CLI tools.

pub mod cli;
pub mod observability;
pub mod operations;
pub mod record;
pub mod storage;
