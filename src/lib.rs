//! Calendar dates (no time, no zone) and a codec that moves them through a
//! JSON token stream as strings.
//!
//! A [`DateCodec`] writes dates with a configurable pattern and locale, and
//! reads them back either strictly against that pattern or, when no pattern
//! is set, with lenient locale-aware parsing.
//!
//! ```
//! use date_codec::{CalendarDate, DateCodec, Locale};
//!
//! let codec = DateCodec::builder()
//!     .pattern("dd MMM yyyy")
//!     .locale(Locale::from_name("en-GB")?)
//!     .build()?;
//! let date = CalendarDate::new(2023, 1, 5)?;
//! assert_eq!(codec.format(date), "05 Jan 2023");
//! assert_eq!(codec.parse("05 Jan 2023")?, date);
//! # Ok::<(), date_codec::ParseError>(())
//! ```

mod codec;
mod consts;
mod date;
mod error;
mod flexible;
mod json;
mod locale;
mod pattern;
mod prelude;
mod registry;
pub mod serde_iso;
mod token;
mod types;

#[cfg(test)]
mod test_utils;

pub use codec::{CodecConfig, DateCodec, DateCodecBuilder, DateConverter};
pub use consts::*;
pub use date::CalendarDate;
pub use error::{CodecError, ParseError};
pub use flexible::parse_flexible;
pub use json::{JsonTokenWriter, TokenBuffer};
pub use locale::{DateOrder, Locale};
pub use pattern::Pattern;
pub use registry::ConverterRegistry;
pub use token::{HostValue, Position, Token, TokenKind, TokenReader, TokenWriter, TypeTag};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

pub use chrono::Weekday;
