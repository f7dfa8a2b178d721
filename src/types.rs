use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR,
};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(ParseError::InvalidYear(i64::from(value))),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<i64> for Year {
    type Error = ParseError;

    /// Years coming back from `chrono` are signed and may be far out of range.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| ParseError::InvalidYear(value))
            .and_then(Self::new)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(ParseError::InvalidMonth(u32::from(value))),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Number of days this month has in `year`
    pub const fn days_in(self, year: Year) -> u8 {
        days_in_month(year.get(), self.get())
    }
}

impl TryFrom<u32> for Month {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ParseError::InvalidMonth(value))
            .and_then(Self::new)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A day-of-month value, validated against its year and month on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it exists in the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        Self::try_new(u32::from(value), year, month)
    }

    /// Same as [`Day::new`] for a day read from text, which may not fit a `u8`.
    pub(crate) fn try_new(value: u32, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDay {
            month: u32::from(month.get()),
            day: value,
            year: i64::from(year.get()),
        };

        let day = u8::try_from(value)
            .ok()
            .and_then(NonZeroU8::new)
            .ok_or_else(invalid)?;
        if day.get() > month.days_in(year) {
            return Err(invalid());
        }
        Ok(Self(day))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{month, year};

    #[test]
    fn test_year_bounds() {
        assert_eq!(Year::new(1).map(Year::get), Ok(1));
        assert_eq!(Year::new(9999).map(Year::get), Ok(9999));
        assert_eq!(Year::new(0), Err(ParseError::InvalidYear(0)));
        assert_eq!(Year::new(10000), Err(ParseError::InvalidYear(10000)));
    }

    #[test]
    fn test_year_try_from_wide_values() {
        assert_eq!(Year::try_from(2024_i64).map(Year::get), Ok(2024));
        assert_eq!(Year::try_from(70_000_i64), Err(ParseError::InvalidYear(70_000)));
        assert_eq!(Year::try_from(12_345_i64), Err(ParseError::InvalidYear(12_345)));
        assert_eq!(Year::try_from(-44_i64), Err(ParseError::InvalidYear(-44)));
    }

    #[test]
    fn test_year_display_pads() {
        assert_eq!(year(33).to_string(), "0033");
        assert_eq!(year(2024).to_string(), "2024");
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert_eq!(Month::new(0), Err(ParseError::InvalidMonth(0)));
        assert_eq!(Month::new(13), Err(ParseError::InvalidMonth(13)));
    }

    #[test]
    fn test_month_try_from_wide_values() {
        assert_eq!(Month::try_from(12_u32), Ok(month(12)));
        assert_eq!(Month::try_from(300_u32), Err(ParseError::InvalidMonth(300)));
        assert_eq!(month(8).to_string(), "08");
    }

    #[test]
    fn test_day_cases() {
        struct TestCase {
            day: u8,
            year: u16,
            month: u8,
            valid: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                day: 31,
                year: 2024,
                month: 1,
                valid: true,
                description: "last day of January",
            },
            TestCase {
                day: 0,
                year: 2024,
                month: 1,
                valid: false,
                description: "day zero",
            },
            TestCase {
                day: 29,
                year: 2023,
                month: 2,
                valid: false,
                description: "Feb 29 in a common year",
            },
            TestCase {
                day: 29,
                year: 2024,
                month: 2,
                valid: true,
                description: "Feb 29 in a leap year",
            },
            TestCase {
                day: 29,
                year: 1900,
                month: 2,
                valid: false,
                description: "Feb 29 in a century year",
            },
            TestCase {
                day: 29,
                year: 2000,
                month: 2,
                valid: true,
                description: "Feb 29 in a 400-year",
            },
            TestCase {
                day: 31,
                year: 2024,
                month: 4,
                valid: false,
                description: "April 31",
            },
        ];

        for case in &cases {
            let result = Day::new(case.day, year(case.year), month(case.month));
            assert_eq!(result.is_ok(), case.valid, "{}", case.description);
        }
    }

    #[test]
    fn test_day_error_carries_context() {
        let result = Day::new(32, year(2024), month(1));
        assert_eq!(
            result,
            Err(ParseError::InvalidDay {
                month: 1,
                day: 32,
                year: 2024,
            })
        );

        let result = Day::try_new(400, year(2024), month(1));
        assert_eq!(
            result,
            Err(ParseError::InvalidDay {
                month: 1,
                day: 400,
                year: 2024,
            })
        );
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            let m = u8::try_from(index + 1).unwrap();
            assert_eq!(days_in_month(2023, m), *days, "month {m}");
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }
}
