//! Query and mutate operations over a loaded database
//!
//! - `find_by_id`: linear scan, first match
//! - `add`: append a new record, rejecting an existing student ID
//! - `update`: patch an existing record in place, never creating one
//!
//! Inputs are expected to have passed the field validators already; the
//! operations only enforce uniqueness, existence and enrollment/grade
//! alignment. A failed operation leaves the database unchanged.

mod errors;

pub use errors::{OperationError, OperationResult};

use crate::record::{Database, StudentRecord};

/// Module code to enrol in or regrade.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleUpdate {
    pub module_code: String,
    /// `None` enrols without a grade, or leaves an existing grade alone
    pub grade: Option<f64>,
}

/// New phone number, or removal of the one on file.
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneUpdate {
    Set(String),
    Clear,
}

/// Changes to apply to one record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub phone: Option<PhoneUpdate>,
    pub module: Option<ModuleUpdate>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.module.is_none()
    }

    fn apply(&self, record: &mut StudentRecord) {
        if let Some(ref name) = self.name {
            record.set_name(name.clone());
        }
        match self.phone {
            Some(PhoneUpdate::Set(ref phone)) => record.set_phone(phone.clone()),
            Some(PhoneUpdate::Clear) => record.clear_phone(),
            None => {}
        }
        if let Some(ref module) = self.module {
            record.enrol(module.module_code.clone(), module.grade);
        }
    }
}

/// Finds the record for `student_id`.
pub fn find_by_id(db: &Database, student_id: u64) -> Option<&StudentRecord> {
    db.find(student_id)
}

/// Appends `record` unless its student ID is already present.
pub fn add(db: &mut Database, record: StudentRecord) -> OperationResult<()> {
    if db.contains(record.student_id) {
        return Err(OperationError::DuplicateId(record.student_id));
    }
    record.validate()?;

    db.push(record);
    Ok(())
}

/// Applies `patch` to the record for `student_id` and returns the result.
pub fn update<'a>(
    db: &'a mut Database,
    student_id: u64,
    patch: &RecordPatch,
) -> OperationResult<&'a StudentRecord> {
    let record = db
        .find_mut(student_id)
        .ok_or(OperationError::NotFound(student_id))?;

    // Commit only if the patched copy is well formed.
    let mut patched = record.clone();
    patch.apply(&mut patched);
    if let Err(reason) = patched.validate() {
        if record.validate().is_err() {
            return Err(OperationError::InconsistentRecord { student_id, reason });
        }
        return Err(reason.into());
    }

    *record = patched;
    Ok(&*record)
}
