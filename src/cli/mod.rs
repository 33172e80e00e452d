//! CLI module for the student record tools
//!
//! Provides the three binaries:
//! - querydb: print all records or parts of one record
//! - addrecord: append a new record
//! - updaterecord: patch an existing record
//!
//! Any tool run with no arguments writes the example database instead.

mod args;
mod commands;
mod config;
mod errors;
mod example;
mod io;

pub use args::{normalize_flags, AddArgs, QueryArgs, UpdateArgs};
pub use commands::{
    add, build_patch, build_record, create_example, query, run_add, run_query, run_update, update,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use example::{example_records, write_example_database, ExampleOutcome};
pub use io::{write_record, write_view, RecordView};
