//! Query/mutate operation errors

use thiserror::Error;

use crate::record::ValidationError;

/// Result type for database operations
pub type OperationResult<T> = Result<T, OperationError>;

/// Operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("Student ID {0} already exists")]
    DuplicateId(u64),

    #[error("No record with student ID {0} was found")]
    NotFound(u64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record as loaded from the file already breaks a record rule
    #[error("Stored record for student ID {student_id} is inconsistent: {reason}")]
    InconsistentRecord {
        student_id: u64,
        reason: ValidationError,
    },
}
