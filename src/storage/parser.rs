//! Database text parser
//!
//! The file is a sequence of tag lines, each value tag followed by exactly
//! one value line:
//!
//! ```text
//! #RECORD
//!  #SID
//!      12345
//!  #NAME
//!      Sam Eold
//! ```
//!
//! Parsing is a fold over the numbered, non-blank, trimmed lines. The fold
//! state names what the next line must be, and the record under
//! construction travels inside that state, so every transition is a plain
//! function of (state, line).
//!
//! Policies:
//! - the first non-blank line must be `#RECORD`
//! - tags after `#RECORD` may come in any order and may be absent
//! - a repeated `#SID`, `#NAME` or `#PHONE` keeps the last value;
//!   a repeated `#ENROLLMENTS` or `#GRADES` appends
//! - `#RECORD` with nothing before the next `#RECORD` (or end of input) is
//!   skipped; a record with fields but no `#SID` is malformed
//! - end of input while a tag waits for its value is malformed
//! - duplicate student IDs are not a parse error

use crate::record::StudentRecord;

use super::errors::{StorageError, StorageResult};
use super::tag::{Tag, ValueTag};

/// Grade token written for an enrollment that has no grade yet
pub const UNGRADED_MARKER: &str = "-";

/// A record whose tags are still being read.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct PartialRecord {
    /// Line of the `#RECORD` tag that opened this record
    opened_at: usize,
    student_id: Option<u64>,
    name: Option<String>,
    phone: Option<String>,
    enrollments: Vec<String>,
    grades: Vec<Option<f64>>,
}

impl PartialRecord {
    fn opened_at(line: usize) -> Self {
        Self {
            opened_at: line,
            ..Self::default()
        }
    }

    fn is_blank(&self) -> bool {
        self.student_id.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.enrollments.is_empty()
            && self.grades.is_empty()
    }

    /// Completes the record; `Ok(None)` for a record with no fields at all.
    fn finish(self) -> StorageResult<Option<StudentRecord>> {
        if self.is_blank() {
            return Ok(None);
        }

        let student_id = self.student_id.ok_or_else(|| {
            StorageError::malformed_at_line(self.opened_at, "Record has no #SID tag")
        })?;

        Ok(Some(StudentRecord {
            student_id,
            name: self.name.unwrap_or_default(),
            phone: self.phone,
            enrollments: self.enrollments,
            grades: self.grades,
        }))
    }
}

/// What the parser expects from the next non-blank line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParseState {
    /// Nothing read yet; only `#RECORD` is acceptable
    Start,
    /// A `#RECORD` tag was just read
    RecordOpened(PartialRecord),
    /// A value was just consumed; the next line must be a tag
    AwaitingTag(PartialRecord),
    /// `tag` (read on `tag_line`) needs its value line
    AwaitingValue {
        record: PartialRecord,
        tag: ValueTag,
        tag_line: usize,
    },
}

/// Fold accumulator: current state plus the records completed so far.
#[derive(Debug)]
pub(crate) struct Parse {
    pub(crate) state: ParseState,
    pub(crate) records: Vec<StudentRecord>,
}

impl Parse {
    pub(crate) fn new() -> Self {
        Self {
            state: ParseState::Start,
            records: Vec::new(),
        }
    }

    /// Feeds one trimmed, non-blank line.
    pub(crate) fn step(self, line_no: usize, line: &str) -> StorageResult<Self> {
        let Parse { state, mut records } = self;

        let state = match state {
            ParseState::Start => expect_first_record(line_no, line)?,
            ParseState::RecordOpened(record) | ParseState::AwaitingTag(record) => {
                on_tag(record, line_no, line, &mut records)?
            }
            ParseState::AwaitingValue { record, tag, .. } => {
                ParseState::AwaitingTag(on_value(record, tag, line_no, line)?)
            }
        };

        Ok(Parse { state, records })
    }

    /// Closes the parse at end of input.
    pub(crate) fn finish(self) -> StorageResult<Vec<StudentRecord>> {
        let Parse { state, mut records } = self;

        match state {
            ParseState::Start => {}
            ParseState::RecordOpened(record) | ParseState::AwaitingTag(record) => {
                records.extend(record.finish()?);
            }
            ParseState::AwaitingValue { tag, tag_line, .. } => {
                return Err(StorageError::malformed_at_line(
                    tag_line,
                    format!("Unexpected end of input: {} has no value", tag),
                ));
            }
        }

        Ok(records)
    }
}

fn expect_first_record(line_no: usize, line: &str) -> StorageResult<ParseState> {
    match Tag::from_line(line) {
        Some(Tag::Record) => Ok(ParseState::RecordOpened(PartialRecord::opened_at(line_no))),
        _ => Err(StorageError::malformed_at_line(
            line_no,
            format!("Expected #RECORD as first tag, found '{}'", line),
        )),
    }
}

/// Transition out of `RecordOpened` and `AwaitingTag`.
fn on_tag(
    record: PartialRecord,
    line_no: usize,
    line: &str,
    records: &mut Vec<StudentRecord>,
) -> StorageResult<ParseState> {
    let Some(tag) = Tag::from_line(line) else {
        return Err(not_a_tag(line_no, line));
    };

    match tag.value_tag() {
        Some(tag) => Ok(ParseState::AwaitingValue {
            record,
            tag,
            tag_line: line_no,
        }),
        None => {
            records.extend(record.finish()?);
            Ok(ParseState::RecordOpened(PartialRecord::opened_at(line_no)))
        }
    }
}

fn not_a_tag(line_no: usize, line: &str) -> StorageError {
    if line.starts_with('#') {
        StorageError::malformed_at_line(
            line_no,
            format!(
                "Unrecognized tag '{}': expected #SID, #NAME, #ENROLLMENTS, #GRADES, #PHONE or #RECORD",
                line
            ),
        )
    } else {
        StorageError::malformed_at_line(line_no, format!("Expected a tag, found '{}'", line))
    }
}

/// Stores the value line for `tag` into the record.
fn on_value(
    mut record: PartialRecord,
    tag: ValueTag,
    line_no: usize,
    value: &str,
) -> StorageResult<PartialRecord> {
    match tag {
        ValueTag::Sid => {
            let id = value.parse::<u64>().map_err(|_| {
                StorageError::malformed_at_line(
                    line_no,
                    format!("#SID value '{}' is not an unsigned integer", value),
                )
            })?;
            record.student_id = Some(id);
        }
        ValueTag::Name => record.name = Some(value.to_string()),
        ValueTag::Phone => record.phone = Some(value.to_string()),
        ValueTag::Enrollments => record
            .enrollments
            .extend(value.split_whitespace().map(str::to_string)),
        ValueTag::Grades => {
            for token in value.split_whitespace() {
                record.grades.push(parse_grade_token(line_no, token)?);
            }
        }
    }

    Ok(record)
}

fn parse_grade_token(line_no: usize, token: &str) -> StorageResult<Option<f64>> {
    if token == UNGRADED_MARKER {
        return Ok(None);
    }

    match token.parse::<f64>() {
        Ok(grade) if grade.is_finite() => Ok(Some(grade)),
        _ => Err(StorageError::malformed_at_line(
            line_no,
            format!("#GRADES value '{}' is not a number", token),
        )),
    }
}

/// Parses the full text of a database file.
///
/// Leading and trailing whitespace on every line is ignored, as are blank
/// lines.
pub fn parse_database(text: &str) -> StorageResult<Vec<StudentRecord>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .try_fold(Parse::new(), |parse, (line_no, line)| parse.step(line_no, line))?
        .finish()
}
