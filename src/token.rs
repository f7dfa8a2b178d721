//! The seams a host serializer implements to drive a codec: declared target
//! types, the values it hands over on write, and the token stream on both sides.

use std::{borrow::Cow, fmt};

use crate::date::CalendarDate;
use crate::prelude::*;

pub(crate) const CALENDAR_DATE_NAME: &str = "CalendarDate";

/// Identifies the declared type of the field being read or written.
///
/// The host builds these at composition time instead of inspecting runtime
/// type information. A tag knows its name and whether the target accepts
/// absence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag {
    name: Cow<'static, str>,
    nullable: bool,
}

impl TypeTag {
    /// The non-nullable calendar date target
    pub const CALENDAR_DATE: Self = Self {
        name: Cow::Borrowed(CALENDAR_DATE_NAME),
        nullable: false,
    };
    /// The calendar date target that also accepts absence
    pub const NULLABLE_CALENDAR_DATE: Self = Self {
        name: Cow::Borrowed(CALENDAR_DATE_NAME),
        nullable: true,
    };

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    /// The same type wrapped so that it accepts absence
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn accepts_absence(&self) -> bool {
        self.nullable
    }

    pub fn is_calendar_date(&self) -> bool {
        self.name == CALENDAR_DATE_NAME
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable { write!(f, "Option<{}>", self.name) } else { f.write_str(&self.name) }
    }
}

/// A value the host asks a converter to write.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Absent,
    Date(CalendarDate),
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Any other host type, identified by name
    Other(&'static str),
}

impl HostValue {
    /// Short name of the value's kind, used in mismatch messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Absent => "null",
            Self::Date(_) => CALENDAR_DATE_NAME,
            Self::Text(_) => "String",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Boolean(_) => "Boolean",
            Self::Other(name) => *name,
        }
    }
}

impl From<CalendarDate> for HostValue {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<Option<CalendarDate>> for HostValue {
    fn from(date: Option<CalendarDate>) -> Self {
        date.map_or(Self::Absent, Self::Date)
    }
}

/// Kind of the token under the reader's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    Null,
    String,
    /// A date literal the stream already parsed itself
    Date,
    Integer,
    Float,
    Boolean,
    StartObject,
    StartArray,
}

/// One token as exposed by the host's reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Null,
    String(String),
    Date(CalendarDate),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    StartObject,
    StartArray,
}

impl Token {
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::String(_) => TokenKind::String,
            Self::Date(_) => TokenKind::Date,
            Self::Integer(_) => TokenKind::Integer,
            Self::Float(_) => TokenKind::Float,
            Self::Boolean(_) => TokenKind::Boolean,
            Self::StartObject => TokenKind::StartObject,
            Self::StartArray => TokenKind::StartArray,
        }
    }
}

/// Where a token sits in the document, as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Position {
    path: String,
    line: Option<usize>,
    column: Option<usize>,
}

impl Position {
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    pub const fn column(&self) -> Option<usize> {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path '{}'", self.path)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, ", line {line}, position {column}")?;
        }
        f.write_str(".")
    }
}

/// Output side of the host's token stream.
pub trait TokenWriter {
    fn write_null(&mut self);
    fn write_string(&mut self, text: &str);
}

/// Input side of the host's token stream, positioned on the token to convert.
pub trait TokenReader {
    fn token(&self) -> &Token;
    fn position(&self) -> Position;
}
