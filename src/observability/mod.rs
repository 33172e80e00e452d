//! Observability for the record tools
//!
//! Structured JSON log lines on stderr. Logging never affects command
//! results and never writes to stdout.

mod logger;

pub use logger::{format_line, Logger, Severity};
