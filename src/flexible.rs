//! Lenient date reading for codecs with no configured pattern.
//!
//! Accepts ISO dates, the locale's numeric short-date order and dates with
//! spelled-out month names, in the locale or in invariant English.

use chrono::NaiveDate;
use tracing::trace;

use crate::ParseError;
use crate::consts::{ISO_FORMAT, MAX_COMPONENT_DIGITS, TWO_DIGIT_YEAR_MAX};
use crate::date::CalendarDate;
use crate::locale::{DateOrder, Locale};
use crate::types::Month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Number {
    value: u32,
    digits: usize,
}

impl Number {
    /// Two-digit (or shorter) years map into the window ending at `TWO_DIGIT_YEAR_MAX`.
    fn as_year(self) -> i64 {
        let value = i64::from(self.value);
        if self.digits > 2 {
            return value;
        }
        let max = i64::from(TWO_DIGIT_YEAR_MAX);
        let year = max / 100 * 100 + value;
        if year > max { year - 100 } else { year }
    }
}

/// Parses `text` leniently under `locale`.
///
/// # Errors
/// Returns `ParseError::EmptyInput` for blank text, `ParseError::UnknownName`
/// for words that are neither month nor day names, and
/// `ParseError::InvalidFormat` when the fields cannot be assigned to a single
/// unambiguous date. Out-of-range fields are reported with the value read.
pub fn parse_flexible(text: &str, locale: &Locale) -> Result<CalendarDate, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_FORMAT) {
        return CalendarDate::try_from(date);
    }
    if trimmed.contains(':') {
        return Err(ParseError::InvalidFormat(format!("'{trimmed}' has a time component")));
    }

    let (numbers, month) = scan(trimmed, locale)?;

    let (year, month, day) = match (month, numbers.as_slice()) {
        (Some(month), &[first, second]) => {
            // Whichever number is written long is the year; otherwise the last one is.
            if first.digits > 2 && second.digits <= 2 {
                (first.as_year(), u32::from(month.get()), second.value)
            } else {
                (second.as_year(), u32::from(month.get()), first.value)
            }
        }
        (None, &[first, second, third]) => {
            let order = if first.digits > 2 {
                DateOrder::YearMonthDay
            } else {
                locale.date_order()
            };
            match order {
                DateOrder::YearMonthDay => (first.as_year(), second.value, third.value),
                DateOrder::MonthDayYear => (third.as_year(), first.value, second.value),
                DateOrder::DayMonthYear => (third.as_year(), second.value, first.value),
            }
        }
        (_, found) => {
            return Err(ParseError::InvalidFormat(format!(
                "'{trimmed}' does not name a year, month and day ({} number(s){})",
                found.len(),
                if month.is_some() { " and a month name" } else { "" }
            )));
        }
    };

    trace!(year, month, day, "resolved flexible date fields");
    CalendarDate::from_numbers(year, month, day)
}

/// Splits text into numbers and at most one month name. Day names are skipped.
///
/// Each word is looked up in the locale first (months, then days) and only
/// then in invariant English, so a localized day name that spells an English
/// month abbreviation still reads as a day.
fn scan(text: &str, locale: &Locale) -> Result<(Vec<Number>, Option<Month>), ParseError> {
    let invariant = Locale::invariant();
    let mut numbers = Vec::with_capacity(3);
    let mut month = None;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_digit() {
            let mut end = start + 1;
            while let Some((index, _)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
                end = index + 1;
            }
            let digits = &text[start..end];
            if digits.len() > MAX_COMPONENT_DIGITS {
                return Err(ParseError::InvalidFormat(format!(
                    "'{digits}' is too long for a date component"
                )));
            }
            let value = digits
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidFormat(digits.to_owned()))?;
            numbers.push(Number {
                value,
                digits: digits.len(),
            });
        } else if c.is_alphabetic() {
            let mut end = start + c.len_utf8();
            while let Some((index, c)) = chars.next_if(|(_, c)| c.is_alphabetic()) {
                end = index + c.len_utf8();
            }
            let word = &text[start..end];
            let found = match classify(word, locale).or_else(|| classify(word, &invariant)) {
                Some(Word::Month(found)) => found,
                Some(Word::Day) => continue,
                None => return Err(ParseError::UnknownName(word.to_owned())),
            };
            if month.replace(found).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "'{text}' names more than one month"
                )));
            }
        } else if !is_separator(c, locale) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character '{c}' in '{text}'"
            )));
        }
    }

    Ok((numbers, month))
}

enum Word {
    Month(Month),
    Day,
}

fn classify(word: &str, locale: &Locale) -> Option<Word> {
    if let Some(month) = locale.month_from_name(word) {
        Some(Word::Month(month))
    } else if locale.is_day_name(word) {
        Some(Word::Day)
    } else {
        None
    }
}

fn is_separator(c: char, locale: &Locale) -> bool {
    matches!(c, '-' | '/' | '.' | ',') || c.is_whitespace() || locale.date_separator().contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, locale};

    #[test]
    fn test_iso_in_every_locale() {
        for name in Locale::available() {
            let parsed = parse_flexible("2023-01-05", &locale(name));
            assert_eq!(parsed, Ok(date(2023, 1, 5)), "locale '{name}'");
        }
    }

    #[test]
    fn test_numeric_order_follows_locale() {
        struct TestCase {
            locale: &'static str,
            text: &'static str,
            expected: (u16, u8, u8),
        }

        let cases = [
            TestCase {
                locale: "en-US",
                text: "1/5/2023",
                expected: (2023, 1, 5),
            },
            TestCase {
                locale: "en-GB",
                text: "1/5/2023",
                expected: (2023, 5, 1),
            },
            TestCase {
                locale: "de-DE",
                text: "05.01.2023",
                expected: (2023, 1, 5),
            },
            TestCase {
                locale: "",
                text: "12/31/2023",
                expected: (2023, 12, 31),
            },
            TestCase {
                locale: "fr-FR",
                text: "2023/12/31",
                expected: (2023, 12, 31),
            },
            TestCase {
                locale: "en-US",
                text: "1/5/23",
                expected: (2023, 1, 5),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.expected;
            assert_eq!(
                parse_flexible(case.text, &locale(case.locale)),
                Ok(date(y, m, d)),
                "'{}' under '{}'",
                case.text,
                case.locale
            );
        }
    }

    #[test]
    fn test_month_names() {
        let invariant = Locale::invariant();
        let cases = [
            ("January 5, 2023", date(2023, 1, 5)),
            ("5 Jan 2023", date(2023, 1, 5)),
            ("2023 Jan 5", date(2023, 1, 5)),
            ("Thursday, January 5, 2023", date(2023, 1, 5)),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_flexible(text, &invariant), Ok(expected), "'{text}'");
        }

        let de = locale("de-DE");
        assert_eq!(parse_flexible("5. März 2023", &de), Ok(date(2023, 3, 5)));
        // invariant names are understood in every locale
        assert_eq!(parse_flexible("5 March 2023", &de), Ok(date(2023, 3, 5)));

        let fr = locale("fr-FR");
        assert_eq!(parse_flexible("mer. 1 févr. 2023", &fr), Ok(date(2023, 2, 1)));
        // "mar." is Tuesday in French, not the English abbreviation for March
        assert_eq!(parse_flexible("mar. 7 mars 2023", &fr), Ok(date(2023, 3, 7)));
        assert_eq!(parse_flexible("Mardi 7 mars 2023", &fr), Ok(date(2023, 3, 7)));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let invariant = Locale::invariant();
        assert_eq!(parse_flexible("  2023-01-05\t", &invariant), Ok(date(2023, 1, 5)));
        assert_eq!(parse_flexible(" 5 Jan 2023 ", &invariant), Ok(date(2023, 1, 5)));
    }

    #[test]
    fn test_rejections() {
        let invariant = Locale::invariant();
        assert_eq!(parse_flexible("   ", &invariant), Err(ParseError::EmptyInput));
        assert!(matches!(
            parse_flexible("Smarch 5 2023", &invariant),
            Err(ParseError::UnknownName(_))
        ));

        let malformed = [
            "2023-01-05T10:00:00",
            "2023-01",
            "January 5",
            "January February 5 2023",
            "2023_01_05",
            "123456-01-05",
        ];
        for text in malformed {
            assert!(
                matches!(parse_flexible(text, &invariant), Err(ParseError::InvalidFormat(_))),
                "'{text}'"
            );
        }
    }

    #[test]
    fn test_calendar_is_still_validated() {
        let us = locale("en-US");
        assert!(matches!(
            parse_flexible("2/29/2023", &us),
            Err(ParseError::InvalidDay { .. })
        ));
        assert_eq!(parse_flexible("13/01/2023", &us), Err(ParseError::InvalidMonth(13)));
        assert_eq!(parse_flexible("2/29/2024", &us), Ok(date(2024, 2, 29)));
        assert_eq!(parse_flexible("10000-01-01", &us), Err(ParseError::InvalidYear(10_000)));
        assert_eq!(parse_flexible("0000-01-01", &us), Err(ParseError::InvalidYear(0)));
    }

    #[test]
    fn test_overflowing_fields_report_read_value() {
        let us = locale("en-US");
        assert_eq!(parse_flexible("2023-300-01", &us), Err(ParseError::InvalidMonth(300)));
        assert_eq!(
            parse_flexible("2023-01-300", &us),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 300,
                year: 2023,
            })
        );
        assert_eq!(
            parse_flexible("January 300 2023", &us),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 300,
                year: 2023,
            })
        );
        assert_eq!(parse_flexible("5/1/99999", &us), Err(ParseError::InvalidYear(99_999)));
    }
}
