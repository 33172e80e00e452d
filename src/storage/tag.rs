//! The six tags of the record file format

use std::fmt;

/// A tag line in the database file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Starts a new record
    Record,
    Sid,
    Name,
    Enrollments,
    Grades,
    Phone,
}

impl Tag {
    /// Every tag, in serialization order
    pub const ALL: [Tag; 6] = [
        Tag::Record,
        Tag::Sid,
        Tag::Name,
        Tag::Enrollments,
        Tag::Grades,
        Tag::Phone,
    ];

    /// The literal text of the tag line
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Record => "#RECORD",
            Tag::Sid => "#SID",
            Tag::Name => "#NAME",
            Tag::Enrollments => "#ENROLLMENTS",
            Tag::Grades => "#GRADES",
            Tag::Phone => "#PHONE",
        }
    }

    /// Matches a trimmed line against the known tags. Case-sensitive.
    pub fn from_line(line: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.as_str() == line)
    }

    /// The value-carrying form of this tag; `None` for `#RECORD`.
    pub(crate) fn value_tag(self) -> Option<ValueTag> {
        match self {
            Tag::Record => None,
            Tag::Sid => Some(ValueTag::Sid),
            Tag::Name => Some(ValueTag::Name),
            Tag::Enrollments => Some(ValueTag::Enrollments),
            Tag::Grades => Some(ValueTag::Grades),
            Tag::Phone => Some(ValueTag::Phone),
        }
    }
}

/// A tag that is followed by exactly one value line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueTag {
    Sid,
    Name,
    Enrollments,
    Grades,
    Phone,
}

impl ValueTag {
    pub(crate) fn tag(self) -> Tag {
        match self {
            ValueTag::Sid => Tag::Sid,
            ValueTag::Name => Tag::Name,
            ValueTag::Enrollments => Tag::Enrollments,
            ValueTag::Grades => Tag::Grades,
            ValueTag::Phone => Tag::Phone,
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().as_str())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
