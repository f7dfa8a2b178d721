//! `#[serde(with = "...")]` helpers that run a field through the default
//! [`DateCodec`]: ISO `yyyy-MM-dd` on write, flexible invariant parsing on read.
//!
//! ```
//! use date_codec::CalendarDate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Invoice {
//!     #[serde(with = "date_codec::serde_iso")]
//!     issued: CalendarDate,
//!     #[serde(default, with = "date_codec::serde_iso::option")]
//!     paid: Option<CalendarDate>,
//! }
//!
//! let json = r#"{"issued": "January 5, 2023", "paid": ""}"#;
//! let invoice: Invoice = serde_json::from_str(json).unwrap();
//! assert_eq!(invoice.issued, CalendarDate::new(2023, 1, 5).unwrap());
//! assert_eq!(invoice.paid, None);
//! ```

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;

use crate::codec::DateCodec;
use crate::date::CalendarDate;
use crate::json::TokenBuffer;
use crate::token::TypeTag;

pub fn serialize<S>(date: &CalendarDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&DateCodec::new().format(*date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<CalendarDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    DateCodec::new()
        .read(&TokenBuffer::from_json(&value), &TypeTag::CALENDAR_DATE)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("missing date"))
}

/// The same helpers for `Option<CalendarDate>`. `null` and `""` both read as `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<CalendarDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CalendarDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        DateCodec::new()
            .read(&TokenBuffer::from_json(&value), &TypeTag::NULLABLE_CALENDAR_DATE)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Shipment {
        #[serde(with = "crate::serde_iso")]
        shipped: CalendarDate,
        #[serde(default, with = "crate::serde_iso::option")]
        arrived: Option<CalendarDate>,
    }

    #[test]
    fn test_serialize() {
        let shipment = Shipment {
            shipped: date(2023, 1, 5),
            arrived: None,
        };
        assert_eq!(
            serde_json::to_value(&shipment).unwrap(),
            json!({"shipped": "2023-01-05", "arrived": null})
        );
    }

    #[test]
    fn test_deserialize_is_flexible() {
        let json = json!({"shipped": "5 Jan 2023", "arrived": "2023-01-09"});
        let shipment: Shipment = serde_json::from_value(json).unwrap();
        assert_eq!(shipment.shipped, date(2023, 1, 5));
        assert_eq!(shipment.arrived, Some(date(2023, 1, 9)));
    }

    #[test]
    fn test_absent_optional() {
        for arrived in [json!(null), json!("")] {
            let json = json!({"shipped": "2023-01-05", "arrived": arrived});
            let shipment: Shipment = serde_json::from_value(json).unwrap();
            assert_eq!(shipment.arrived, None);
        }
        let shipment: Shipment = serde_json::from_value(json!({"shipped": "2023-01-05"})).unwrap();
        assert_eq!(shipment.arrived, None);
    }

    #[test]
    fn test_required_field_errors() {
        let err = serde_json::from_value::<Shipment>(json!({"shipped": null})).unwrap_err();
        assert!(err.to_string().contains("Cannot convert null value to CalendarDate"), "{err}");

        let err = serde_json::from_value::<Shipment>(json!({"shipped": 20230105})).unwrap_err();
        assert!(err.to_string().contains("Expected String, got Integer"), "{err}");

        let err = serde_json::from_value::<Shipment>(json!({"shipped": "not a date"})).unwrap_err();
        assert!(err.to_string().contains("Could not convert string 'not a date'"), "{err}");
    }
}
