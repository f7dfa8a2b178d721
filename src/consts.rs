/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used when a pattern has no day field
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Pattern used when none is configured. The hyphens are literals, so the
/// output never depends on the locale.
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

/// `chrono` format string tried first by flexible parsing
pub(crate) const ISO_FORMAT: &str = "%Y-%m-%d";

/// Pattern behind the `o`/`O` standard format
pub const ROUND_TRIP_PATTERN: &str = "yyyy'-'MM'-'dd";

/// Pattern behind the `r`/`R` standard format, always rendered with invariant names
pub const RFC1123_PATTERN: &str = "ddd, dd MMM yyyy";

/// Two-digit years map into the century window ending at this year
pub const TWO_DIGIT_YEAR_MAX: u16 = 2049;

/// Longest run of digits accepted for a single numeric date component
pub(crate) const MAX_COMPONENT_DIGITS: usize = 5;
