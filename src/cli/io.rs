//! Terminal output for the record tools
//!
//! All writers take an explicit `Write` so commands can be exercised against
//! a buffer in tests. Output goes to stdout; diagnostics never do.

use std::io::Write;

use crate::record::StudentRecord;

use super::errors::CliResult;

/// Which parts of a record `-sid` should print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordView {
    pub name: bool,
    pub grades: bool,
    pub phone: bool,
}

impl RecordView {
    /// No narrowing flag: the full record.
    pub fn is_full(&self) -> bool {
        !(self.name || self.grades || self.phone)
    }
}

/// Writes `Name: ...`.
pub fn write_name<W: Write>(out: &mut W, record: &StudentRecord) -> CliResult<()> {
    writeln!(out, "Name: {}", record.name)?;
    Ok(())
}

/// Writes the module code/grade pairs, one per line, in enrollment order.
pub fn write_grades<W: Write>(out: &mut W, record: &StudentRecord) -> CliResult<()> {
    writeln!(out, "Module Codes and Grades:")?;
    if record.enrollments.is_empty() {
        writeln!(out, "(no enrollments)")?;
    }
    for (code, grade) in record.graded_enrollments() {
        match grade {
            Some(grade) => writeln!(out, "{}: {}", code, grade)?,
            None => writeln!(out, "{}: (no grade)", code)?,
        }
    }
    Ok(())
}

/// Writes `Phone: ...`.
pub fn write_phone<W: Write>(out: &mut W, record: &StudentRecord) -> CliResult<()> {
    match record.phone {
        Some(ref phone) => writeln!(out, "Phone: {}", phone)?,
        None => writeln!(out, "Phone: (none on file)")?,
    }
    Ok(())
}

/// Writes the complete record.
pub fn write_record<W: Write>(out: &mut W, record: &StudentRecord) -> CliResult<()> {
    writeln!(out, "Student ID: {}", record.student_id)?;
    write_name(out, record)?;
    write_phone(out, record)?;
    write_grades(out, record)
}

/// Writes the parts of `record` selected by `view`, in name, grades, phone
/// order.
pub fn write_view<W: Write>(out: &mut W, record: &StudentRecord, view: RecordView) -> CliResult<()> {
    if view.is_full() {
        return write_record(out, record);
    }
    if view.name {
        write_name(out, record)?;
    }
    if view.grades {
        write_grades(out, record)?;
    }
    if view.phone {
        write_phone(out, record)?;
    }
    Ok(())
}

/// Writes a one-line status message.
pub fn write_message<W: Write>(out: &mut W, message: &str) -> CliResult<()> {
    writeln!(out, "{}", message)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(record: &StudentRecord, view: RecordView) -> String {
        let mut buf = Vec::new();
        write_view(&mut buf, record, view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> StudentRecord {
        let mut record = StudentRecord::new(12345, "Sam Eold");
        record.enrol("COMP101", Some(40.5));
        record.enrol("COMP110", Some(55.6));
        record
    }

    #[test]
    fn test_full_record() {
        let text = render(&sample(), RecordView::default());
        assert_eq!(
            text,
            "Student ID: 12345\nName: Sam Eold\nPhone: (none on file)\n\
             Module Codes and Grades:\nCOMP101: 40.5\nCOMP110: 55.6\n"
        );
    }

    #[test]
    fn test_grades_only() {
        let view = RecordView {
            grades: true,
            ..RecordView::default()
        };
        assert_eq!(
            render(&sample(), view),
            "Module Codes and Grades:\nCOMP101: 40.5\nCOMP110: 55.6\n"
        );
    }

    #[test]
    fn test_name_and_phone() {
        let mut record = sample();
        record.set_phone("44-1234-456123");
        let view = RecordView {
            name: true,
            phone: true,
            grades: false,
        };
        assert_eq!(render(&record, view), "Name: Sam Eold\nPhone: 44-1234-456123\n");
    }

    #[test]
    fn test_ungraded_and_empty() {
        let mut record = StudentRecord::new(1, "Les Sismore");
        let view = RecordView {
            grades: true,
            ..RecordView::default()
        };
        assert_eq!(render(&record, view), "Module Codes and Grades:\n(no enrollments)\n");

        record.enrol("COMP123", None);
        assert!(render(&record, view).contains("COMP123: (no grade)"));
    }
}
