//! Storage error types
//!
//! Error codes:
//! - STUDENTDB_MALFORMED_FILE: database text does not follow the tag grammar
//! - STUDENTDB_IO_ERROR: database file cannot be opened, read or written

use std::fmt;
use std::io;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Unexpected tag, bad SID/grade value, missing leading #RECORD
    MalformedFile,
    /// File could not be opened in the requested mode
    IoError,
}

impl StorageErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::MalformedFile => "STUDENTDB_MALFORMED_FILE",
            StorageErrorCode::IoError => "STUDENTDB_IO_ERROR",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with line or path context
#[derive(Debug)]
pub struct StorageError {
    /// Error code
    code: StorageErrorCode,
    /// Human-readable message
    message: String,
    /// 1-based line number for parse failures
    line: Option<usize>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl StorageError {
    /// Parse failure at `line` (1-based).
    pub fn malformed_at_line(line: usize, message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::MalformedFile,
            message: message.into(),
            line: Some(line),
            source: None,
        }
    }

    /// File I/O failure.
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::IoError,
            message: message.into(),
            line: None,
            source: Some(source),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending line, if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn is_malformed(&self) -> bool {
        self.code == StorageErrorCode::MalformedFile
    }

    /// Whether this is an I/O error of kind `NotFound`
    pub fn is_not_found(&self) -> bool {
        self.source
            .as_ref()
            .map(|e| e.kind() == io::ErrorKind::NotFound)
            .unwrap_or(false)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
