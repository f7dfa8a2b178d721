use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::CalendarDate;
use crate::error::{CodecError, ParseError};
use crate::flexible::parse_flexible;
use crate::locale::Locale;
use crate::pattern::Pattern;
use crate::token::{CALENDAR_DATE_NAME, HostValue, Token, TokenReader, TokenWriter, TypeTag};

/// Pattern and locale a codec is built with.
///
/// Deserializes from e.g. `{"pattern": "dd/MM/yyyy", "locale": "en-GB"}`;
/// both keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Used for writing and for strict reading. `None` (or empty) means the
    /// ISO `yyyy-MM-dd` on write and flexible parsing on read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub locale: Locale,
}

/// Something the host can dispatch calendar-date fields to.
pub trait DateConverter: Send + Sync + fmt::Debug {
    /// Type names this converter should be registered under
    fn type_names(&self) -> &'static [&'static str];

    fn can_handle(&self, declared: &TypeTag) -> bool;

    /// # Errors
    /// Returns `CodecError::TypeMismatch` if `value` is present but not a date.
    fn write(&self, value: &HostValue, writer: &mut dyn TokenWriter) -> Result<(), CodecError>;

    /// # Errors
    /// Returns the `CodecError` matching why the current token is not a date.
    fn read(
        &self,
        reader: &dyn TokenReader,
        declared: &TypeTag,
    ) -> Result<Option<CalendarDate>, CodecError>;
}

/// Converts calendar dates to and from JSON string tokens.
///
/// A codec is immutable once built, so one instance can serve any number of
/// concurrent serializations. Build another codec for a different pattern or
/// locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCodec {
    config: CodecConfig,
    pattern: Pattern,
}

impl DateCodec {
    /// ISO `yyyy-MM-dd` on write, flexible invariant parsing on read.
    pub fn new() -> Self {
        Self {
            config: CodecConfig::default(),
            pattern: Pattern::iso(),
        }
    }

    pub fn builder() -> DateCodecBuilder {
        DateCodecBuilder::default()
    }

    /// Builds a codec from a loaded configuration. An empty pattern counts as unset.
    ///
    /// # Errors
    /// Returns the `ParseError` from compiling the pattern.
    pub fn from_config(mut config: CodecConfig) -> Result<Self, ParseError> {
        config.pattern = config.pattern.filter(|pattern| !pattern.is_empty());
        let pattern = match &config.pattern {
            Some(source) => Pattern::compile(source, &config.locale)?,
            None => Pattern::iso(),
        };
        Ok(Self { config, pattern })
    }

    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn pattern(&self) -> Option<&str> {
        self.config.pattern.as_deref()
    }

    pub const fn locale(&self) -> &Locale {
        &self.config.locale
    }

    /// Renders `date` with the configured pattern, or ISO when none is set.
    pub fn format(&self, date: CalendarDate) -> String {
        self.pattern.format(date, &self.config.locale)
    }

    /// Reads `text` strictly against the configured pattern, or flexibly when
    /// none is set. A configured pattern never falls back to flexible parsing.
    ///
    /// # Errors
    /// Returns the `ParseError` describing the first mismatch.
    pub fn parse(&self, text: &str) -> Result<CalendarDate, ParseError> {
        if self.config.pattern.is_some() {
            self.pattern.parse(text, &self.config.locale)
        } else {
            parse_flexible(text, &self.config.locale)
        }
    }

    /// True for `CalendarDate` and its nullable form only.
    pub fn can_handle(&self, declared: &TypeTag) -> bool {
        declared.is_calendar_date()
    }

    /// Emits `null` for an absent value and a string token for a date.
    ///
    /// # Errors
    /// Returns `CodecError::TypeMismatch` for any other kind of value.
    pub fn write<W>(&self, value: &HostValue, writer: &mut W) -> Result<(), CodecError>
    where
        W: TokenWriter + ?Sized,
    {
        match value {
            HostValue::Absent => writer.write_null(),
            HostValue::Date(date) => writer.write_string(&self.format(*date)),
            other => {
                return Err(CodecError::TypeMismatch {
                    expected: CALENDAR_DATE_NAME,
                    actual: other.kind_name(),
                });
            }
        }
        Ok(())
    }

    /// Reads the reader's current token into a date, or `None` when the
    /// declared target accepts absence and the token is `null` or `""`.
    ///
    /// Date tokens the stream parsed itself are returned unchanged, without
    /// checking them against the configured pattern. String tokens always
    /// are checked, so the two paths can disagree on what is accepted.
    ///
    /// # Errors
    /// - `CodecError::NullNotAllowed` for `null` into a non-nullable target
    /// - `CodecError::FormatParse` for text that does not parse, including `""`
    ///   into a non-nullable target
    /// - `CodecError::TokenType` for numbers, booleans, objects and arrays
    pub fn read<R>(
        &self,
        reader: &R,
        declared: &TypeTag,
    ) -> Result<Option<CalendarDate>, CodecError>
    where
        R: TokenReader + ?Sized,
    {
        match reader.token() {
            Token::Null if declared.accepts_absence() => Ok(None),
            Token::Null => Err(CodecError::NullNotAllowed {
                target: declared.clone(),
                position: reader.position(),
            }),
            Token::Date(date) => {
                debug!(
                    position = %reader.position(),
                    date = %date,
                    "passing native date token through unvalidated"
                );
                Ok(Some(*date))
            }
            Token::String(text) if text.is_empty() && declared.accepts_absence() => Ok(None),
            Token::String(text) => {
                let parsed = if text.is_empty() {
                    Err(ParseError::EmptyInput)
                } else {
                    self.parse(text)
                };
                parsed.map(Some).map_err(|source| {
                    trace!(text = %text, error = %source, "date text rejected");
                    CodecError::FormatParse {
                        text: text.clone(),
                        pattern: self.config.pattern.clone(),
                        position: reader.position(),
                        source,
                    }
                })
            }
            other => Err(CodecError::TokenType {
                found: other.kind(),
                position: reader.position(),
            }),
        }
    }
}

impl Default for DateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<CodecConfig> for DateCodec {
    type Error = ParseError;

    fn try_from(config: CodecConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}

impl DateConverter for DateCodec {
    fn type_names(&self) -> &'static [&'static str] {
        &[CALENDAR_DATE_NAME]
    }

    fn can_handle(&self, declared: &TypeTag) -> bool {
        Self::can_handle(self, declared)
    }

    fn write(&self, value: &HostValue, writer: &mut dyn TokenWriter) -> Result<(), CodecError> {
        Self::write(self, value, writer)
    }

    fn read(
        &self,
        reader: &dyn TokenReader,
        declared: &TypeTag,
    ) -> Result<Option<CalendarDate>, CodecError> {
        Self::read(self, reader, declared)
    }
}

/// Collects a pattern and locale, then compiles them into a [`DateCodec`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DateCodecBuilder {
    config: CodecConfig,
}

impl DateCodecBuilder {
    /// Sets the pattern for both writing and strict reading. Empty clears it.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.config.pattern = (!pattern.is_empty()).then_some(pattern);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// # Errors
    /// Returns the `ParseError` from compiling the pattern.
    pub fn build(self) -> Result<DateCodec, ParseError> {
        DateCodec::from_config(self.config)
    }
}
