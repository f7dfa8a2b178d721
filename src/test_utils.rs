use crate::date::CalendarDate;
use crate::locale::Locale;
use crate::types::{Month, Year};

pub fn year(value: u16) -> Year {
    Year::new(value).unwrap()
}

pub fn month(value: u8) -> Month {
    Month::new(value).unwrap()
}

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

pub fn locale(name: &str) -> Locale {
    Locale::from_name(name).unwrap()
}
