//! Field validation errors
//!
//! Validators report a plain `bool`; these errors are produced by the
//! `check_*`/`parse_*` helpers so callers get a message naming the field and
//! the violated constraint.

use thiserror::Error;

/// Result type for field validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A field value or field combination that breaks a record rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid student ID '{0}': must be an unsigned integer")]
    InvalidId(String),

    #[error("Student ID '{0}' is too large")]
    IdOutOfRange(String),

    #[error("Invalid name '{0}': must be at least two words of letters separated by single spaces")]
    InvalidName(String),

    #[error("Invalid phone number '{0}': only digits and hyphens are allowed, with no spaces")]
    InvalidPhone(String),

    #[error("Invalid module code '{0}': must be alphanumeric with no symbols")]
    InvalidModuleCode(String),

    #[error("Invalid grade '{0}': must be an unsigned decimal number such as 55 or 40.5")]
    InvalidGrade(String),

    #[error("Number of module codes ({codes}) and grades ({grades}) do not match")]
    GradeCountMismatch { codes: usize, grades: usize },

    #[error("Grades cannot be given without module codes")]
    GradesWithoutModules,

    #[error("Module code '{0}' is listed more than once")]
    DuplicateModuleCode(String),

    #[error("Missing required value: {0}")]
    MissingField(&'static str),

    #[error("{flag} cannot be used without {requires}")]
    Requires {
        flag: &'static str,
        requires: &'static str,
    },
}
