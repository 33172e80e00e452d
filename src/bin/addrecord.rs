//! `addrecord` entry point
//!
//! Parsing, file access and output live in the CLI module; this only reports
//! the error and sets the exit status.

use studentdb::cli;

fn main() {
    if let Err(e) = cli::run_add() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
