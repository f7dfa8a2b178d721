use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::ParseError;
use crate::consts::DATE_SEPARATOR;
use crate::prelude::*;
use crate::types::{Day, Month, Year};

/// A Gregorian calendar date with no time-of-day and no time zone.
///
/// Wraps a [`NaiveDate`] whose year is held to `1..=9999`. Values are only
/// built through validating constructors, so every `CalendarDate` names a day
/// that exists. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{date}")]
pub struct CalendarDate {
    date: NaiveDate,
}

impl CalendarDate {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns the first component that is out of range for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Self::from_parts(year, month, day)
    }

    /// Creates a date from components read out of text. Whichever component
    /// is out of range is reported with the value that was read.
    pub(crate) fn from_numbers(year: i64, month: u32, day: u32) -> Result<Self, ParseError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let day = Day::try_new(day, year, month)?;
        Self::from_parts(year, month, day)
    }

    /// Creates a date from already-validated components.
    ///
    /// `Day` is checked against its own year and month when built, so this
    /// only re-checks that the day still fits the month it is paired with.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that month.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        let day = Day::new(day.get(), year, month)?;
        let (y, m, d) = (year.get(), month.get(), day.get());

        NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d))
            .map(|date| Self { date })
            .ok_or(ParseError::InvalidDay {
                month: u32::from(m),
                day: u32::from(d),
                year: i64::from(y),
            })
    }

    // The year is held to 1..=9999, so these narrowings never truncate.

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(&self) -> u16 {
        self.date.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(&self) -> u8 {
        self.date.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(&self) -> u8 {
        self.date.day() as u8
    }

    /// Day of the week this date falls on
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Components as a plain tuple: (year, month, day)
    pub fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.date
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<CalendarDate> for (u16, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        date.to_tuple()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    /// Accepts any `NaiveDate` whose year is in `1..=9999`.
    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Year::try_from(i64::from(date.year()))?;
        Ok(Self { date })
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.date
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses exactly `YYYY-MM-DD`: four-digit year, two-digit month and day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} part(s) in '{s}'",
                parts.len()
            )));
        };

        let year = parse_fixed_digits(year, 4)?;
        let month = parse_fixed_digits(month, 2)?;
        let day = parse_fixed_digits(day, 2)?;
        Self::from_numbers(i64::from(year), month, day)
    }
}

fn parse_fixed_digits(part: &str, width: usize) -> Result<u32, ParseError> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(format!("'{part}' is not a {width}-digit number")));
    }
    part.parse::<u32>().map_err(|_| ParseError::InvalidFormat(part.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month, year};

    #[test]
    fn test_new_validates_components() {
        assert!(CalendarDate::new(2023, 1, 5).is_ok());
        assert_eq!(CalendarDate::new(0, 1, 5), Err(ParseError::InvalidYear(0)));
        assert_eq!(
            CalendarDate::new(2023, 13, 5),
            Err(ParseError::InvalidMonth(13))
        );
        assert_eq!(
            CalendarDate::new(2023, 2, 29),
            Err(ParseError::InvalidDay {
                month: 2,
                day: 29,
                year: 2023,
            })
        );
    }

    #[test]
    fn test_from_numbers_reports_read_values() {
        assert_eq!(CalendarDate::from_numbers(2023, 1, 5), Ok(date(2023, 1, 5)));
        assert_eq!(
            CalendarDate::from_numbers(12_345, 1, 5),
            Err(ParseError::InvalidYear(12_345))
        );
        assert_eq!(
            CalendarDate::from_numbers(2023, 300, 5),
            Err(ParseError::InvalidMonth(300))
        );
        assert_eq!(
            CalendarDate::from_numbers(2023, 1, 700),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 700,
                year: 2023,
            })
        );
    }

    #[test]
    fn test_accessors() {
        let d = date(2023, 12, 31);
        assert_eq!(d.year(), 2023);
        assert_eq!(d.month(), 12);
        assert_eq!(d.day(), 31);
        assert_eq!(d.to_tuple(), (2023, 12, 31));
        assert_eq!(d.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_weekday_known_dates() {
        let cases = [
            ((2023, 1, 5), Weekday::Thu),
            ((2000, 1, 1), Weekday::Sat),
            ((2024, 2, 29), Weekday::Thu),
            ((1, 1, 1), Weekday::Mon),
            ((9999, 12, 31), Weekday::Fri),
            ((1970, 1, 1), Weekday::Thu),
        ];

        for ((y, m, d), expected) in cases {
            assert_eq!(date(y, m, d).weekday(), expected, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_from_parts_rechecks_day() {
        let leap_day = Day::new(29, year(2024), month(2)).unwrap();
        assert!(CalendarDate::from_parts(year(2023), month(2), leap_day).is_err());

        let d = CalendarDate::from_parts(year(2024), month(2), leap_day).unwrap();
        assert_eq!(d, date(2024, 2, 29));
    }

    #[test]
    fn test_naive_date_conversions() {
        let naive = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(CalendarDate::try_from(naive), Ok(date(2023, 1, 5)));
        assert_eq!(NaiveDate::from(date(2023, 1, 5)), naive);
        assert_eq!(date(2023, 1, 5).as_naive(), naive);

        let too_late = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert_eq!(
            CalendarDate::try_from(too_late),
            Err(ParseError::InvalidYear(10_000))
        );
        let before_common_era = NaiveDate::from_ymd_opt(0, 12, 31).unwrap();
        assert_eq!(
            CalendarDate::try_from(before_common_era),
            Err(ParseError::InvalidYear(0))
        );
    }

    #[test]
    fn test_display_is_iso() {
        assert_eq!(date(2023, 1, 5).to_string(), "2023-01-05");
        assert_eq!(date(1, 1, 1).to_string(), "0001-01-01");
        assert_eq!(date(9999, 12, 31).to_string(), "9999-12-31");
    }

    #[test]
    fn test_from_str_strict_iso() {
        assert_eq!("2023-01-05".parse::<CalendarDate>(), Ok(date(2023, 1, 5)));
        assert_eq!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput));

        let rejected = [
            "2023-1-5",
            "23-01-05",
            "2023/01/05",
            "2023-01-05-01",
            " 2023-01-05",
            "2023-0a-05",
        ];
        for bad in rejected {
            assert!(
                matches!(bad.parse::<CalendarDate>(), Err(ParseError::InvalidFormat(_))),
                "'{bad}' should be rejected"
            );
        }

        assert!(matches!(
            "2023-02-30".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date(2023, 1, 31) < date(2023, 2, 1));
        assert!(date(2022, 12, 31) < date(2023, 1, 1));
        assert!(date(2023, 5, 4) < date(2023, 5, 5));
    }

    #[test]
    fn test_tuple_conversions() {
        let d: CalendarDate = (2020, 2, 29).try_into().unwrap();
        assert_eq!(<(u16, u8, u8)>::from(d), (2020, 2, 29));

        let result: Result<CalendarDate, _> = (2021, 2, 29).try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(1991, 8, 15);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""1991-08-15""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2024-02-30""#);
        assert!(result.is_err());
        let result: Result<CalendarDate, _> = serde_json::from_str("20240101");
        assert!(result.is_err());
    }
}
