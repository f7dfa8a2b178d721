//! Compiled date patterns: custom specifiers (`yyyy`, `MM`, `dd`, ...) and the
//! single-letter standard formats that expand through a [`Locale`].
//!
//! Formatting lowers a pattern to `chrono` format items. Strict parsing reads
//! numeric fields with `chrono::format::parse` into a [`Parsed`]; localized
//! names are matched here, case-insensitively.

use std::fmt;
use std::iter;

use chrono::Weekday;
use chrono::format::{self, Fixed, Item, Numeric, Pad, ParseErrorKind, Parsed};

use crate::ParseError;
use crate::consts::{
    DEFAULT_PATTERN, JANUARY, MIN_DAY, RFC1123_PATTERN, ROUND_TRIP_PATTERN, TWO_DIGIT_YEAR_MAX,
};
use crate::date::CalendarDate;
use crate::locale::{Locale, strip_prefix_ignore_case};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `d` run: 1-2 numeric, 3 abbreviated name, 4+ full name
    Day(usize),
    /// `M` run: 1-2 numeric, 3 abbreviated name, 4+ full name
    Month(usize),
    /// `y` run: 1-2 two-digit year, 3+ zero-padded to the run length
    Year(usize),
    Era,
    DateSeparator,
    Literal(String),
}

impl Segment {
    const fn field(specifier: char, run: usize) -> Self {
        match specifier {
            'd' => Self::Day(run),
            'M' => Self::Month(run),
            'y' => Self::Year(run),
            _ => Self::Era,
        }
    }
}

/// A pattern compiled once and reused for every format and strict parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
    invariant_names: bool,
}

impl Pattern {
    /// The `yyyy-MM-dd` pattern used when nothing is configured.
    pub fn iso() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_owned(),
            segments: vec![
                Segment::Year(4),
                Segment::Literal("-".to_owned()),
                Segment::Month(2),
                Segment::Literal("-".to_owned()),
                Segment::Day(2),
            ],
            invariant_names: false,
        }
    }

    /// Compiles `source`, expanding single-letter standard formats through `locale`.
    ///
    /// # Errors
    /// Returns `ParseError::UnterminatedQuote` for an open quoted literal and
    /// `ParseError::UnsupportedPattern` for time-of-day specifiers, unknown
    /// standard formats or an empty pattern.
    pub fn compile(source: &str, locale: &Locale) -> Result<Self, ParseError> {
        let mut chars = source.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ParseError::UnsupportedPattern(String::new())),
            (Some(letter), None) => Self::standard(source, letter, locale),
            _ => Ok(Self {
                source: source.to_owned(),
                segments: tokenize(source)?,
                invariant_names: false,
            }),
        }
    }

    fn standard(source: &str, letter: char, locale: &Locale) -> Result<Self, ParseError> {
        let (expanded, invariant_names) = match letter {
            'd' => (locale.short_date_pattern(), false),
            'D' => (locale.long_date_pattern(), false),
            'm' | 'M' => (locale.month_day_pattern(), false),
            'y' | 'Y' => (locale.year_month_pattern(), false),
            'o' | 'O' => (ROUND_TRIP_PATTERN, true),
            'r' | 'R' => (RFC1123_PATTERN, true),
            _ => return Err(ParseError::UnsupportedPattern(source.to_owned())),
        };
        Ok(Self {
            source: source.to_owned(),
            segments: tokenize(expanded)?,
            invariant_names,
        })
    }

    /// The pattern text as configured (before any standard-format expansion)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders `date`. Never fails: every field a pattern can name exists on a valid date.
    pub fn format(&self, date: CalendarDate, locale: &Locale) -> String {
        let locale = self.names_locale(locale);
        let items = self.items(date, &locale);
        date.as_naive()
            .format_localized_with_items(items.iter(), locale.names())
            .to_string()
    }

    /// Lowers the segments to `chrono` items. Era and separator text come from `locale`.
    fn items(&self, date: CalendarDate, locale: &Locale) -> Vec<Item<'_>> {
        self.segments
            .iter()
            .map(|segment| match *segment {
                Segment::Day(1) => Item::Numeric(Numeric::Day, Pad::None),
                Segment::Day(2) => Item::Numeric(Numeric::Day, Pad::Zero),
                Segment::Day(3) => Item::Fixed(Fixed::ShortWeekdayName),
                Segment::Day(_) => Item::Fixed(Fixed::LongWeekdayName),
                Segment::Month(1) => Item::Numeric(Numeric::Month, Pad::None),
                Segment::Month(2) => Item::Numeric(Numeric::Month, Pad::Zero),
                Segment::Month(3) => Item::Fixed(Fixed::ShortMonthName),
                Segment::Month(_) => Item::Fixed(Fixed::LongMonthName),
                Segment::Year(1) => Item::Numeric(Numeric::YearMod100, Pad::None),
                Segment::Year(2) => Item::Numeric(Numeric::YearMod100, Pad::Zero),
                Segment::Year(4) => Item::Numeric(Numeric::Year, Pad::Zero),
                // chrono always pads a year to four digits
                Segment::Year(width) => {
                    Item::OwnedLiteral(format!("{:0width$}", date.year()).into())
                }
                Segment::Era => Item::Literal(locale.era()),
                Segment::DateSeparator => Item::Literal(locale.date_separator()),
                Segment::Literal(ref literal) => Item::Literal(literal.as_str()),
            })
            .collect()
    }

    /// Parses `text` so that it matches this pattern exactly: no surrounding
    /// whitespace, every literal and separator in place, nothing left over.
    ///
    /// # Errors
    /// Returns the first mismatch, or the calendar error if the fields name a
    /// day that does not exist.
    pub fn parse(&self, text: &str, locale: &Locale) -> Result<CalendarDate, ParseError> {
        let locale = self.names_locale(locale);
        let mut fields = Fields::default();
        let mut rest = text;

        for segment in &self.segments {
            rest = match *segment {
                Segment::Day(run @ 1..=2) => {
                    let (digits, rest) = take_digits(rest, numeric_width(run))?;
                    fields.read_number(Numeric::Day, digits)?;
                    rest
                }
                Segment::Day(run) => {
                    let (weekday, rest) = take_name(rest, &locale.day_names(run == 3))?;
                    fields.set_weekday(weekday)?;
                    rest
                }
                Segment::Month(run @ 1..=2) => {
                    let (digits, rest) = take_digits(rest, numeric_width(run))?;
                    fields.read_number(Numeric::Month, digits)?;
                    rest
                }
                Segment::Month(run) => {
                    let (month, rest) = take_name(rest, &locale.month_names(run == 3))?;
                    fields.set_month(month)?;
                    rest
                }
                Segment::Year(run @ 1..=2) => {
                    let (digits, rest) = take_digits(rest, numeric_width(run))?;
                    fields.read_number(Numeric::YearMod100, digits)?;
                    rest
                }
                Segment::Year(run) => {
                    let (digits, rest) = take_digits(rest, (run, run.max(4)))?;
                    fields.read_year(digits)?;
                    rest
                }
                Segment::Era => expect(rest, locale.era(), true)?,
                Segment::DateSeparator => expect(rest, locale.date_separator(), false)?,
                Segment::Literal(ref literal) => expect(rest, literal, false)?,
            };
        }

        if !rest.is_empty() {
            return Err(ParseError::InvalidFormat(format!("unexpected trailing text '{rest}'")));
        }
        fields.into_date(&self.source, &locale)
    }

    fn names_locale(&self, locale: &Locale) -> Locale {
        if self.invariant_names {
            Locale::invariant()
        } else {
            *locale
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::iso()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn tokenize(source: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            'd' | 'M' | 'y' | 'g' => {
                let mut run = 1;
                while chars.next_if_eq(&c).is_some() {
                    run += 1;
                }
                segments.push(Segment::field(c, run));
            }
            '%' => match chars.next() {
                Some(specifier @ ('d' | 'M' | 'y' | 'g')) => {
                    segments.push(Segment::field(specifier, 1));
                }
                _ => return Err(ParseError::UnsupportedPattern(source.to_owned())),
            },
            '/' => segments.push(Segment::DateSeparator),
            '\'' | '"' => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some(close) if close == c => break,
                        Some('\\') => {
                            let escaped = chars
                                .next()
                                .ok_or_else(|| ParseError::UnterminatedQuote(source.to_owned()))?;
                            literal.push(escaped);
                        }
                        Some(other) => literal.push(other),
                        None => return Err(ParseError::UnterminatedQuote(source.to_owned())),
                    }
                }
                push_literal(&mut segments, &literal);
            }
            '\\' => {
                let escaped = chars.next().ok_or_else(|| {
                    ParseError::InvalidFormat(format!("pattern '{source}' ends with an escape"))
                })?;
                push_literal(&mut segments, escaped.encode_utf8(&mut [0; 4]));
            }
            // Time-of-day and offset specifiers have nothing to bind to on a date.
            'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'K' => {
                return Err(ParseError::UnsupportedPattern(source.to_owned()));
            }
            other => push_literal(&mut segments, other.encode_utf8(&mut [0; 4])),
        }
    }

    Ok(segments)
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_owned()));
    }
}

const fn numeric_width(run: usize) -> (usize, usize) {
    if run == 1 { (1, 2) } else { (2, 2) }
}

/// Splits off the leading run of `min..=max` ASCII digits.
fn take_digits(text: &str, (min, max): (usize, usize)) -> Result<(&str, &str), ParseError> {
    let len = text.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return Err(ParseError::InvalidFormat(format!(
            "expected at least {min} digit(s) at '{text}'"
        )));
    }
    Ok(text.split_at(len))
}

/// Longest name in `names` that prefixes `text`.
fn take_name<'a, K: Copy>(
    text: &'a str,
    names: &[(K, String)],
) -> Result<(K, &'a str), ParseError> {
    names
        .iter()
        .filter_map(|(key, name)| strip_prefix_ignore_case(text, name).map(|rest| (*key, rest)))
        .min_by_key(|(_, rest)| rest.len())
        .ok_or_else(|| {
            let word: String = text.chars().take_while(|c| c.is_alphabetic()).collect();
            ParseError::UnknownName(if word.is_empty() { text.to_owned() } else { word })
        })
}

fn expect<'a>(text: &'a str, expected: &str, ignore_case: bool) -> Result<&'a str, ParseError> {
    let rest = if ignore_case {
        strip_prefix_ignore_case(text, expected)
    } else {
        text.strip_prefix(expected)
    };
    rest.ok_or_else(|| ParseError::InvalidFormat(format!("expected '{expected}' at '{text}'")))
}

fn expand_two_digit_year(two_digit: i32) -> i32 {
    let max = i32::from(TWO_DIGIT_YEAR_MAX);
    let year = max / 100 * 100 + two_digit;
    if year > max { year - 100 } else { year }
}

/// Fields read so far. A field given twice must agree with itself, which
/// `Parsed` checks on every set.
#[derive(Debug, Default)]
struct Fields {
    parsed: Parsed,
    /// Day outside 1..=31, reported once the year and month are known
    rejected_day: Option<u32>,
}

impl Fields {
    fn read_number(&mut self, field: Numeric, digits: &str) -> Result<(), ParseError> {
        let item = Item::Numeric(field.clone(), Pad::Zero);
        let Err(err) = format::parse(&mut self.parsed, digits, iter::once(item)) else {
            return Ok(());
        };

        match (field, err.kind()) {
            (Numeric::Month, ParseErrorKind::OutOfRange) => {
                Err(ParseError::InvalidMonth(read_u32(digits)?))
            }
            (Numeric::Day, ParseErrorKind::OutOfRange) => {
                self.rejected_day = Some(read_u32(digits)?);
                Ok(())
            }
            (Numeric::Day, _) => Err(field_error(&err, "day", digits)),
            (Numeric::Month, _) => Err(field_error(&err, "month", digits)),
            _ => Err(field_error(&err, "year", digits)),
        }
    }

    /// `chrono` reads at most four unsigned year digits, so wider runs are set directly.
    fn read_year(&mut self, digits: &str) -> Result<(), ParseError> {
        if digits.len() <= 4 {
            return self.read_number(Numeric::Year, digits);
        }
        let value = digits
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat(format!("'{digits}' is too long for a year")))?;
        self.parsed.set_year(value).map_err(|err| match err.kind() {
            ParseErrorKind::OutOfRange => ParseError::InvalidYear(value),
            _ => field_error(&err, "year", digits),
        })
    }

    fn set_month(&mut self, month: u32) -> Result<(), ParseError> {
        self.parsed
            .set_month(i64::from(month))
            .map_err(|err| field_error(&err, "month", &month.to_string()))
    }

    fn set_weekday(&mut self, weekday: Weekday) -> Result<(), ParseError> {
        self.parsed
            .set_weekday(weekday)
            .map_err(|err| field_error(&err, "day name", &weekday.to_string()))
    }

    /// Missing month and day default to 1; a missing year is an error.
    fn into_date(mut self, source: &str, locale: &Locale) -> Result<CalendarDate, ParseError> {
        let year = match (self.parsed.year(), self.parsed.year_mod_100()) {
            (Some(year), _) => year,
            (None, Some(two_digit)) => expand_two_digit_year(two_digit),
            (None, None) => return Err(ParseError::MissingYear(source.to_owned())),
        };
        let month = self.parsed.month().unwrap_or(u32::from(JANUARY));
        if let Some(day) = self.rejected_day {
            return CalendarDate::from_numbers(i64::from(year), month, day);
        }
        let day = self.parsed.day().unwrap_or(u32::from(MIN_DAY));

        self.parsed
            .set_year(i64::from(year))
            .and_then(|()| self.parsed.set_month(i64::from(month)))
            .and_then(|()| self.parsed.set_day(i64::from(day)))
            .map_err(|err| field_error(&err, "date", source))?;

        match self.parsed.to_naive_date() {
            Ok(date) => CalendarDate::try_from(date),
            Err(err) => {
                let date = CalendarDate::from_numbers(i64::from(year), month, day)?;
                match self.parsed.weekday() {
                    Some(weekday) if weekday != date.weekday() => {
                        Err(ParseError::WeekdayMismatch {
                            name: locale.day_name(weekday),
                            date: date.to_string(),
                        })
                    }
                    _ => Err(ParseError::InvalidFormat(err.to_string())),
                }
            }
        }
    }
}

fn read_u32(digits: &str) -> Result<u32, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("'{digits}' is not a number")))
}

fn field_error(err: &format::ParseError, what: &str, text: &str) -> ParseError {
    match err.kind() {
        ParseErrorKind::Impossible => {
            ParseError::InvalidFormat(format!("conflicting {what} values at '{text}'"))
        }
        _ => ParseError::InvalidFormat(format!("invalid {what} '{text}': {err}")),
    }
}
