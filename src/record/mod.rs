//! Student record model and field validation
//!
//! - `StudentRecord`: one student's fields with aligned enrollments/grades
//! - `Database`: ordered sequence of records
//! - validators: pure syntax checks for every user-supplied field

mod errors;
mod model;
pub mod validators;

pub use errors::{ValidationError, ValidationResult};
pub use model::{Database, StudentRecord};
pub use validators::{
    is_valid_grade, is_valid_id, is_valid_module_code, is_valid_name, is_valid_phone,
};
