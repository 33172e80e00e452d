//! CLI argument definitions using clap
//!
//! Tools:
//! - querydb -db <file> [-showAll] [-sid <id> [-n] [-g] [-p]]
//! - addrecord -db <file> [-sid <id> -name <words...> [-phone <p>]
//!   [-modulecodes <c...> [-grades <g...>]]]
//! - updaterecord -db <file> [-sid <id> [-name <words...>] [-phone <p>]
//!   [-modulecode <c> [-grade <g>]]]
//!
//! The tools take single-dash long flags (`-db`, `-showAll`). clap only
//! knows `--long`, so `normalize_flags` rewrites them before parsing; the
//! `--` spellings work as well. No flag may be given twice.
//!
//! Values are kept as strings here and validated by the commands, so errors
//! name the field and the rule that was broken.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Query the student record database
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "querydb")]
#[command(version, about, long_about = None)]
pub struct QueryArgs {
    /// Path to the database file (must exist)
    #[arg(long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write all records to the terminal
    #[arg(long = "showAll")]
    pub show_all: bool,

    /// Write the record with this student ID
    #[arg(long = "sid", value_name = "ID")]
    pub sid: Option<String>,

    /// With -sid: show the name
    #[arg(short = 'n')]
    pub name: bool,

    /// With -sid: show module codes and grades
    #[arg(short = 'g')]
    pub grades: bool,

    /// With -sid: show the phone number
    #[arg(short = 'p')]
    pub phone: bool,
}

/// Add a new student record to the end of a database file
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "addrecord")]
#[command(version, about, long_about = None)]
pub struct AddArgs {
    /// Path to the database file (created empty if missing)
    #[arg(long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Unique student ID
    #[arg(long = "sid", value_name = "ID")]
    pub sid: Option<String>,

    /// Full name, at least two words
    #[arg(long = "name", value_name = "WORD", num_args = 1.., action = ArgAction::Set)]
    pub name: Option<Vec<String>>,

    /// Phone number, digits and hyphens, no spaces
    #[arg(long = "phone", value_name = "PHONE", num_args = 1.., action = ArgAction::Set)]
    pub phone: Option<Vec<String>>,

    /// Module codes the student is enrolled on
    #[arg(long = "modulecodes", value_name = "CODE", num_args = 1.., action = ArgAction::Set)]
    pub module_codes: Option<Vec<String>>,

    /// Grades, one per module code
    #[arg(long = "grades", value_name = "GRADE", num_args = 1.., action = ArgAction::Set)]
    pub grades: Option<Vec<String>>,
}

/// Update an existing student record
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "updaterecord")]
#[command(version, about, long_about = None)]
pub struct UpdateArgs {
    /// Path to the database file (created empty if missing)
    #[arg(long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Student ID of the record to update
    #[arg(long = "sid", value_name = "ID")]
    pub sid: Option<String>,

    /// Replacement name, at least two words
    #[arg(long = "name", value_name = "WORD", num_args = 1.., action = ArgAction::Set)]
    pub name: Option<Vec<String>>,

    /// New or replacement phone number
    #[arg(long = "phone", value_name = "PHONE", num_args = 1.., action = ArgAction::Set)]
    pub phone: Option<Vec<String>>,

    /// Module code to enrol in or regrade
    #[arg(long = "modulecode", value_name = "CODE")]
    pub module_code: Option<String>,

    /// Grade for -modulecode
    #[arg(long = "grade", value_name = "GRADE")]
    pub grade: Option<String>,
}

/// Rewrites single-dash long flags (`-db`) to clap's `--db` form.
///
/// Single-letter flags (`-n`), `--` flags, negative numbers and plain
/// values pass through unchanged.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(s) if is_single_dash_long(s) => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}

fn is_single_dash_long(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() > 2 && bytes[0] == b'-' && bytes[1].is_ascii_alphabetic()
}

macro_rules! impl_parse_args {
    ($($args:ty),*) => {$(
        impl $args {
            /// Parse the process arguments, exiting with usage on error
            pub fn parse_args() -> Self {
                Self::parse_from(normalize_flags(std::env::args_os()))
            }

            /// Parse an explicit argument list (first item is the program name)
            pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
            where
                I: IntoIterator<Item = T>,
                T: Into<OsString>,
            {
                Self::try_parse_from(normalize_flags(args))
            }
        }
    )*};
}

impl_parse_args!(QueryArgs, AddArgs, UpdateArgs);
