//! Syntactic field validators
//!
//! Every predicate is pure: it takes a single string and answers whether the
//! value is well formed. None of them panic or allocate errors; the `check_*`
//! and `parse_*` wrappers attach a `ValidationError` for callers that need
//! one.
//!
//! Names are restricted to ASCII letters and single spaces, so apostrophes
//! and hyphens ("O'Neil", "Smith-Jones") are rejected.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{ValidationError, ValidationResult};

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();
static MODULE_CODE_PATTERN: OnceLock<Regex> = OnceLock::new();
static GRADE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    // Patterns are literals below; a failure here is a programming error.
    cell.get_or_init(|| Regex::new(source).expect("validator pattern must compile"))
}

/// True iff `s` is non-empty and consists only of decimal digits.
pub fn is_valid_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `s` is two or more alphabetic words separated by single spaces.
pub fn is_valid_name(s: &str) -> bool {
    pattern(&NAME_PATTERN, r"^[A-Za-z]+( [A-Za-z]+)+$").is_match(s)
}

/// True iff `s` is non-empty and only digits and hyphens.
///
/// The empty string is not invalid, it means "no phone on file"; callers
/// map it to `None` before asking this question.
pub fn is_valid_phone(s: &str) -> bool {
    pattern(&PHONE_PATTERN, r"^[0-9-]+$").is_match(s)
}

/// True iff `s` is non-empty and alphanumeric.
pub fn is_valid_module_code(s: &str) -> bool {
    pattern(&MODULE_CODE_PATTERN, r"^[A-Za-z0-9]+$").is_match(s)
}

/// True iff `s` is an unsigned decimal number with an optional fraction.
pub fn is_valid_grade(s: &str) -> bool {
    pattern(&GRADE_PATTERN, r"^[0-9]+(\.[0-9]+)?$").is_match(s)
        && s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Parses a student ID, rejecting signs, symbols and values beyond `u64`.
pub fn parse_id(s: &str) -> ValidationResult<u64> {
    if !is_valid_id(s) {
        return Err(ValidationError::InvalidId(s.to_string()));
    }
    s.parse::<u64>()
        .map_err(|_| ValidationError::IdOutOfRange(s.to_string()))
}

/// Parses a grade string into its floating-point value.
pub fn parse_grade(s: &str) -> ValidationResult<f64> {
    if !is_valid_grade(s) {
        return Err(ValidationError::InvalidGrade(s.to_string()));
    }
    s.parse::<f64>()
        .map_err(|_| ValidationError::InvalidGrade(s.to_string()))
}

/// Checks a full name.
pub fn check_name(s: &str) -> ValidationResult<()> {
    if is_valid_name(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName(s.to_string()))
    }
}

/// Checks a phone number.
pub fn check_phone(s: &str) -> ValidationResult<()> {
    if is_valid_phone(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(s.to_string()))
    }
}

/// Checks a module code.
pub fn check_module_code(s: &str) -> ValidationResult<()> {
    if is_valid_module_code(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidModuleCode(s.to_string()))
    }
}
