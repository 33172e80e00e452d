//! CLI-specific error types
//!
//! Every CLI error is fatal for the invocation: the binary prints it to
//! stderr and exits with status 1.

use std::fmt;
use std::io;

use crate::operations::OperationError;
use crate::record::ValidationError;
use crate::storage::{StorageError, StorageErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Database text does not follow the tag grammar
    MalformedFile,
    /// Bad field syntax or flag combination
    ValidationError,
    /// Add against an existing student ID
    DuplicateId,
    /// Update or query against an absent student ID
    NotFound,
    /// File cannot be opened, read or written
    IoError,
    /// Configuration file error
    ConfigError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedFile => "STUDENTDB_MALFORMED_FILE",
            Self::ValidationError => "STUDENTDB_VALIDATION_ERROR",
            Self::DuplicateId => "STUDENTDB_DUPLICATE_ID",
            Self::NotFound => "STUDENTDB_NOT_FOUND",
            Self::IoError => "STUDENTDB_IO_ERROR",
            Self::ConfigError => "STUDENTDB_CONFIG_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Missing `-db <file>`
    pub fn missing_database() -> Self {
        Self::new(
            CliErrorCode::ValidationError,
            "Please provide a database with -db <filename>",
        )
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::ValidationError, e.to_string())
    }
}

impl From<OperationError> for CliError {
    fn from(e: OperationError) -> Self {
        let code = match e {
            OperationError::DuplicateId(_) => CliErrorCode::DuplicateId,
            OperationError::NotFound(_) => CliErrorCode::NotFound,
            OperationError::Validation(_) => CliErrorCode::ValidationError,
            OperationError::InconsistentRecord { .. } => CliErrorCode::MalformedFile,
        };
        Self::new(code, e.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        let code = match e.code() {
            StorageErrorCode::MalformedFile => CliErrorCode::MalformedFile,
            StorageErrorCode::IoError => CliErrorCode::IoError,
        };

        let mut message = e.message().to_string();
        if let Some(line) = e.line() {
            message.push_str(&format!(" (line {})", line));
        }
        if let Some(source) = std::error::Error::source(&e) {
            message.push_str(&format!(": {}", source));
        }
        Self::new(code, message)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_mapping() {
        let err: CliError = StorageError::malformed_at_line(3, "Expected #RECORD as first tag").into();
        assert_eq!(err.code(), CliErrorCode::MalformedFile);
        assert_eq!(err.message(), "Expected #RECORD as first tag (line 3)");
        assert_eq!(
            err.to_string(),
            "STUDENTDB_MALFORMED_FILE: Expected #RECORD as first tag (line 3)"
        );
    }

    #[test]
    fn test_operation_error_mapping() {
        let err: CliError = OperationError::DuplicateId(12345).into();
        assert_eq!(err.code_str(), "STUDENTDB_DUPLICATE_ID");
        assert!(err.message().contains("12345"));

        let err: CliError = OperationError::NotFound(99999).into();
        assert_eq!(err.code(), CliErrorCode::NotFound);

        let err: CliError = OperationError::InconsistentRecord {
            student_id: 1,
            reason: ValidationError::GradeCountMismatch { codes: 3, grades: 2 },
        }
        .into();
        assert_eq!(err.code(), CliErrorCode::MalformedFile);
    }

    #[test]
    fn test_validation_error_mapping() {
        let err: CliError = ValidationError::InvalidName("Sam".into()).into();
        assert_eq!(err.code(), CliErrorCode::ValidationError);
        assert!(err.message().contains("Sam"));
    }
}
