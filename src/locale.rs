//! Explicit locale data for month names, day names and separators.
//!
//! A [`Locale`] is always passed in by the caller. Nothing here consults the
//! process environment, so the same configuration produces the same text on
//! every machine.

use std::fmt;

use chrono::format::{Fixed, Item};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;
use crate::types::Month;

/// Order of day, month and year in a locale's short numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Names and patterns used to render and read dates for one culture.
///
/// Month and day names come from `chrono`'s locale tables. Separator, era and
/// standard patterns are kept here.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    name: &'static str,
    names: chrono::Locale,
    date_separator: &'static str,
    era: &'static str,
    short_date_pattern: &'static str,
    long_date_pattern: &'static str,
    month_day_pattern: &'static str,
    year_month_pattern: &'static str,
}

const INVARIANT: Locale = Locale {
    name: "",
    names: chrono::Locale::POSIX,
    date_separator: "/",
    era: "A.D.",
    short_date_pattern: "MM/dd/yyyy",
    long_date_pattern: "dddd, dd MMMM yyyy",
    month_day_pattern: "MMMM dd",
    year_month_pattern: "yyyy MMMM",
};

const EN_US: Locale = Locale {
    name: "en-US",
    names: chrono::Locale::en_US,
    date_separator: "/",
    era: "A.D.",
    short_date_pattern: "M/d/yyyy",
    long_date_pattern: "dddd, MMMM d, yyyy",
    month_day_pattern: "MMMM d",
    year_month_pattern: "MMMM yyyy",
};

const EN_GB: Locale = Locale {
    name: "en-GB",
    names: chrono::Locale::en_GB,
    date_separator: "/",
    era: "AD",
    short_date_pattern: "dd/MM/yyyy",
    long_date_pattern: "dddd, d MMMM yyyy",
    month_day_pattern: "d MMMM",
    year_month_pattern: "MMMM yyyy",
};

const DE_DE: Locale = Locale {
    name: "de-DE",
    names: chrono::Locale::de_DE,
    date_separator: ".",
    era: "n. Chr.",
    short_date_pattern: "dd.MM.yyyy",
    long_date_pattern: "dddd, d. MMMM yyyy",
    month_day_pattern: "d. MMMM",
    year_month_pattern: "MMMM yyyy",
};

const FR_FR: Locale = Locale {
    name: "fr-FR",
    names: chrono::Locale::fr_FR,
    date_separator: "/",
    era: "ap. J.-C.",
    short_date_pattern: "dd/MM/yyyy",
    long_date_pattern: "dddd d MMMM yyyy",
    month_day_pattern: "d MMMM",
    year_month_pattern: "MMMM yyyy",
};

static BUILT_IN: [&Locale; 5] = [&INVARIANT, &EN_US, &EN_GB, &DE_DE, &FR_FR];

/// Names are rendered from the first of each month and from the days of the
/// first ISO week of this year.
const SAMPLE_YEAR: i32 = 2024;

impl Locale {
    /// Culture-neutral English rules. This is the default for every codec.
    pub const fn invariant() -> Self {
        INVARIANT
    }

    /// Looks up a built-in locale by its identifier (`"en-US"`, `"de-DE"`, ...).
    ///
    /// Matching ignores ASCII case and accepts `_` in place of `-`. The empty
    /// string and `"invariant"` both name the invariant locale.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownLocale` for identifiers with no built-in data.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        let wanted = name.trim().replace('_', "-");
        if wanted.eq_ignore_ascii_case("invariant") {
            return Ok(INVARIANT);
        }
        BUILT_IN
            .iter()
            .find(|locale| locale.name.eq_ignore_ascii_case(&wanted))
            .map(|locale| **locale)
            .ok_or_else(|| ParseError::UnknownLocale(name.to_owned()))
    }

    /// Identifiers of every built-in locale
    pub fn available() -> impl Iterator<Item = &'static str> {
        BUILT_IN.iter().map(|locale| locale.name)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// `chrono` locale the month and day names are taken from
    pub const fn names(&self) -> chrono::Locale {
        self.names
    }

    pub fn month_name(&self, month: Month) -> String {
        self.month_text(month, Fixed::LongMonthName)
    }

    pub fn abbreviated_month_name(&self, month: Month) -> String {
        self.month_text(month, Fixed::ShortMonthName)
    }

    pub fn day_name(&self, weekday: Weekday) -> String {
        self.day_text(weekday, Fixed::LongWeekdayName)
    }

    pub fn abbreviated_day_name(&self, weekday: Weekday) -> String {
        self.day_text(weekday, Fixed::ShortWeekdayName)
    }

    pub const fn date_separator(&self) -> &'static str {
        self.date_separator
    }

    pub const fn era(&self) -> &'static str {
        self.era
    }

    pub const fn short_date_pattern(&self) -> &'static str {
        self.short_date_pattern
    }

    pub const fn long_date_pattern(&self) -> &'static str {
        self.long_date_pattern
    }

    pub const fn month_day_pattern(&self) -> &'static str {
        self.month_day_pattern
    }

    pub const fn year_month_pattern(&self) -> &'static str {
        self.year_month_pattern
    }

    /// Component order of the short date pattern, used to read all-numeric dates.
    pub fn date_order(&self) -> DateOrder {
        let position = |c: char| self.short_date_pattern.find(c).unwrap_or(usize::MAX);
        let (day, month, year) = (position('d'), position('M'), position('y'));

        if year < month && year < day {
            DateOrder::YearMonthDay
        } else if day < month {
            DateOrder::DayMonthYear
        } else {
            DateOrder::MonthDayYear
        }
    }

    /// Month whose full or abbreviated name equals `word`, ignoring case and trailing dots.
    pub(crate) fn month_from_name(&self, word: &str) -> Option<Month> {
        let (number, _) = self
            .month_names(false)
            .into_iter()
            .chain(self.month_names(true))
            .find(|(_, name)| names_match(name, word))?;
        Month::try_from(number).ok()
    }

    /// Whether `word` names a day of the week, full or abbreviated.
    pub(crate) fn is_day_name(&self, word: &str) -> bool {
        self.day_names(false)
            .into_iter()
            .chain(self.day_names(true))
            .any(|(_, name)| names_match(&name, word))
    }

    /// Every month name as `(month number, name)`, January first.
    pub(crate) fn month_names(&self, abbreviated: bool) -> Vec<(u32, String)> {
        let field = if abbreviated { Fixed::ShortMonthName } else { Fixed::LongMonthName };
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(SAMPLE_YEAR, month, 1))
            .map(|sample| (sample.month(), self.render(sample, field.clone())))
            .collect()
    }

    /// Every day name, Monday first.
    pub(crate) fn day_names(&self, abbreviated: bool) -> Vec<(Weekday, String)> {
        let field = if abbreviated { Fixed::ShortWeekdayName } else { Fixed::LongWeekdayName };
        NaiveDate::from_isoywd_opt(SAMPLE_YEAR, 1, Weekday::Mon)
            .into_iter()
            .flat_map(|monday| monday.iter_days().take(7))
            .map(|sample| (sample.weekday(), self.render(sample, field.clone())))
            .collect()
    }

    fn month_text(&self, month: Month, field: Fixed) -> String {
        NaiveDate::from_ymd_opt(SAMPLE_YEAR, u32::from(month.get()), 1)
            .map(|sample| self.render(sample, field))
            .unwrap_or_default()
    }

    fn day_text(&self, weekday: Weekday, field: Fixed) -> String {
        NaiveDate::from_isoywd_opt(SAMPLE_YEAR, 1, weekday)
            .map(|sample| self.render(sample, field))
            .unwrap_or_default()
    }

    fn render(&self, sample: NaiveDate, field: Fixed) -> String {
        sample
            .format_localized_with_items([Item::Fixed(field)].iter(), self.names)
            .to_string()
    }
}

fn names_match(name: &str, word: &str) -> bool {
    let name = name.trim_end_matches('.');
    let word = word.trim_end_matches('.');
    name.chars().count() == word.chars().count()
        && name
            .chars()
            .zip(word.chars())
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Strips `prefix` from the front of `text`, comparing characters case-insensitively.
pub(crate) fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(rest.next().map_or("", |(index, _)| &text[index..]))
}

/// Locales are identified by name.
impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Locale {}

impl Default for Locale {
    fn default() -> Self {
        INVARIANT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("invariant")
        } else {
            f.write_str(self.name)
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_name(&s).map_err(serde::de::Error::custom)
    }
}
