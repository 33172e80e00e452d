//! In-memory student records
//!
//! A record holds enrollments and grades as two index-aligned lists. A
//! module may be enrolled without a grade: while the record carries no
//! grades at all the grade list stays empty, otherwise the missing grade is a
//! `None` entry at the module's index.
//!
//! Setters do not check alignment; `StudentRecord::validate` is called at
//! commit points (add, update).

use super::errors::{ValidationError, ValidationResult};

/// One student's full set of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    /// Unique, immutable identifier
    pub student_id: u64,
    /// Full name, two or more words
    pub name: String,
    /// Phone number, `None` when nothing is on file
    pub phone: Option<String>,
    /// Module codes, in enrollment order
    pub enrollments: Vec<String>,
    /// `grades[i]` belongs to `enrollments[i]`
    pub grades: Vec<Option<f64>>,
}

impl StudentRecord {
    /// Creates a record with no phone and no enrollments.
    pub fn new(student_id: u64, name: impl Into<String>) -> Self {
        Self {
            student_id,
            name: name.into(),
            phone: None,
            enrollments: Vec::new(),
            grades: Vec::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
    }

    pub fn clear_phone(&mut self) {
        self.phone = None;
    }

    /// Position of `module_code` in the enrollment list.
    pub fn enrollment_index(&self, module_code: &str) -> Option<usize> {
        self.enrollments.iter().position(|code| code == module_code)
    }

    /// Grade recorded for `module_code`.
    ///
    /// Returns `None` both when the student is not enrolled and when the
    /// enrollment has no grade yet.
    pub fn grade_for(&self, module_code: &str) -> Option<f64> {
        self.enrollment_index(module_code)
            .and_then(|i| self.grades.get(i).copied().flatten())
    }

    /// Whether any enrollment carries a grade slot.
    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    /// Enrols in `module_code`, or regrades an existing enrollment.
    ///
    /// An existing grade is only replaced when `grade` is `Some`; enrolling
    /// twice without a grade leaves the record unchanged.
    pub fn enrol(&mut self, module_code: impl Into<String>, grade: Option<f64>) {
        let module_code = module_code.into();

        if let Some(index) = self.enrollment_index(&module_code) {
            if grade.is_some() {
                self.pad_grades();
                self.grades[index] = grade;
            }
            return;
        }

        self.enrollments.push(module_code);
        if grade.is_some() || self.has_grades() {
            self.pad_grades();
            if let Some(last) = self.grades.last_mut() {
                *last = grade;
            }
        }
    }

    /// Extends the grade list with `None` so it lines up with enrollments.
    fn pad_grades(&mut self) {
        if self.grades.len() < self.enrollments.len() {
            self.grades.resize(self.enrollments.len(), None);
        }
    }

    /// Enrollment codes paired with their grades.
    pub fn graded_enrollments(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.enrollments
            .iter()
            .enumerate()
            .map(move |(i, code)| (code.as_str(), self.grades.get(i).copied().flatten()))
    }

    /// Checks the enrollment/grade alignment invariant.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.grades.is_empty() || self.grades.len() == self.enrollments.len() {
            return Ok(());
        }
        if self.enrollments.is_empty() {
            return Err(ValidationError::GradesWithoutModules);
        }
        Err(ValidationError::GradeCountMismatch {
            codes: self.enrollments.len(),
            grades: self.grades.len(),
        })
    }
}

/// Ordered collection of student records.
///
/// Insertion order is preserved. Uniqueness of `student_id` is upheld by the
/// operations that add records, not by parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    records: Vec<StudentRecord>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }

    /// First record with `student_id`, by linear scan.
    pub fn find(&self, student_id: u64) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.student_id == student_id)
    }

    pub fn find_mut(&mut self, student_id: u64) -> Option<&mut StudentRecord> {
        self.records.iter_mut().find(|r| r.student_id == student_id)
    }

    pub fn contains(&self, student_id: u64) -> bool {
        self.find(student_id).is_some()
    }

    /// Appends without checking for duplicates.
    pub(crate) fn push(&mut self, record: StudentRecord) {
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
