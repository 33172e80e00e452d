//! Database text serializer
//!
//! Output is accepted by `parse_database` and re-parses to the same records.
//! Optional blocks (`#ENROLLMENTS`, `#GRADES`, `#PHONE`) are omitted when
//! empty, and so is `#NAME` for a record loaded without one. Grades use
//! Rust's shortest round-trip formatting, so `70.0` is written as `70`.

use std::fmt::Write;

use crate::record::StudentRecord;

use super::parser::UNGRADED_MARKER;
use super::tag::Tag;

/// Indentation of tag and value lines. Purely cosmetic: the parser ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub tag_indent: usize,
    pub value_indent: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tag_indent: 1,
            value_indent: 5,
        }
    }
}

/// Renders all records with the default layout.
pub fn serialize_database<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    serialize_database_with(records, Layout::default())
}

/// Renders all records, in order.
pub fn serialize_database_with<'a, I>(records: I, layout: Layout) -> String
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut out = String::new();
    for record in records {
        write_record(&mut out, record, layout);
    }
    out
}

/// Renders a single record, e.g. for appending to an existing file.
pub fn serialize_record(record: &StudentRecord, layout: Layout) -> String {
    let mut out = String::new();
    write_record(&mut out, record, layout);
    out
}

fn write_record(out: &mut String, record: &StudentRecord, layout: Layout) {
    out.push_str(Tag::Record.as_str());
    out.push('\n');

    write_field(out, layout, Tag::Sid, &record.student_id.to_string());
    // An empty value line would be skipped as blank on re-parse, so the
    // following tag would be read as the value.
    if !record.name.is_empty() {
        write_field(out, layout, Tag::Name, &record.name);
    }

    if !record.enrollments.is_empty() {
        write_field(out, layout, Tag::Enrollments, &record.enrollments.join(" "));
    }

    if !record.grades.is_empty() {
        let grades: Vec<String> = record
            .grades
            .iter()
            .map(|grade| match grade {
                Some(value) => value.to_string(),
                None => UNGRADED_MARKER.to_string(),
            })
            .collect();
        write_field(out, layout, Tag::Grades, &grades.join(" "));
    }

    if let Some(phone) = record.phone.as_deref().filter(|p| !p.is_empty()) {
        write_field(out, layout, Tag::Phone, phone);
    }
}

fn write_field(out: &mut String, layout: Layout, tag: Tag, value: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{:indent$}{}", "", tag, indent = layout.tag_indent);
    let _ = writeln!(out, "{:indent$}{}", "", value, indent = layout.value_indent);
}
