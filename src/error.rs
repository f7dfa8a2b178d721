use crate::consts::{MAX_MONTH, MAX_YEAR};
use crate::prelude::*;
use crate::token::{Position, TokenKind, TypeTag};

/// Failure to turn text (or raw numbers) into a calendar date, or to compile a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(i64),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u32, day: u32, year: i64 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Unrecognized name '{_0}'")]
    UnknownName(String),
    #[display(fmt = "Day name {name} does not fall on {date}")]
    WeekdayMismatch { name: String, date: String },
    #[display(fmt = "Pattern '{_0}' does not determine the year")]
    MissingYear(String),
    #[display(fmt = "Unterminated quote in pattern '{_0}'")]
    UnterminatedQuote(String),
    #[display(fmt = "Unsupported pattern '{_0}'")]
    UnsupportedPattern(String),
    #[display(fmt = "Unknown locale '{_0}'")]
    UnknownLocale(String),
}

impl std::error::Error for ParseError {}

/// Errors raised by [`DateCodec`](crate::DateCodec) reads and writes.
///
/// Every variant that comes from the read side carries the [`Position`] the
/// host reported for the offending token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Write received a value that is not a calendar date.
    #[error("Unexpected value when converting date. Expected {expected}, got {actual}.")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Read received `null` for a target that cannot be absent.
    #[error("Cannot convert null value to {target}. {position}")]
    NullNotAllowed { target: TypeTag, position: Position },

    /// Read received a token kind that can never hold a date.
    #[error("Unexpected token parsing date. Expected String, got {found}. {position}")]
    TokenType { found: TokenKind, position: Position },

    /// Read received string text that does not parse under the active rules.
    #[error(
        "Could not convert string '{text}' to date using {}: {source}. {position}",
        describe_rule(.pattern)
    )]
    FormatParse {
        text: String,
        pattern: Option<String>,
        position: Position,
        source: ParseError,
    },
}

fn describe_rule(pattern: &Option<String>) -> String {
    match pattern {
        Some(pattern) => format!("pattern '{pattern}'"),
        None => "flexible parsing".to_owned(),
    }
}

impl CodecError {
    /// Position of the offending token, when the error came from a read.
    pub const fn position(&self) -> Option<&Position> {
        match self {
            Self::TypeMismatch { .. } => None,
            Self::NullNotAllowed { position, .. }
            | Self::TokenType { position, .. }
            | Self::FormatParse { position, .. } => Some(position),
        }
    }
}
