//! Datetime token decoding
//!
//! Handles the three value shapes found in calendar exports:
//!
//! | Shape | Example | Result |
//! |-------|---------|--------|
//! | UTC | `20240102T090000Z` | absolute UTC instant |
//! | Floating | `20240102T090000` | same wall-clock, no offset applied |
//! | Date | `20240102` | midnight |
//!
//! `TZID` parameters are not resolved; floating and zoned values are both
//! read as wall-clock time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

pub const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
pub const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Why a datetime token could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatetimeError {
    #[error("empty datetime value")]
    EmptyValue,

    #[error("unsupported datetime format: {0:?} (length: {len})", len = .0.len())]
    UnsupportedFormat(String),

    #[error("malformed datetime {value:?}: {reason}")]
    Malformed { value: String, reason: String },
}

/// Decode a raw property value into an absolute timestamp.
///
/// Shape detection runs in a fixed order: empty, UTC (`Z` suffix),
/// floating (contains `T`), then 8-character date.
pub fn decode_datetime(value: &str) -> Result<DateTime<Utc>, DatetimeError> {
    if value.is_empty() {
        return Err(DatetimeError::EmptyValue);
    }

    if value.len() >= 15 && value.ends_with('Z') {
        return NaiveDateTime::parse_from_str(value, UTC_FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(|e| malformed(value, e));
    }

    if value.len() >= 15 && value.contains('T') {
        return NaiveDateTime::parse_from_str(value, FLOATING_FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(|e| malformed(value, e));
    }

    if value.len() == 8 {
        return NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
            .map_err(|e| malformed(value, e));
    }

    Err(DatetimeError::UnsupportedFormat(value.to_string()))
}

fn malformed(value: &str, err: chrono::ParseError) -> DatetimeError {
    DatetimeError::Malformed {
        value: value.to_string(),
        reason: err.to_string(),
    }
}

/// Value after the last `:` of a property line.
///
/// Handles `DTSTART:...`, `DTSTART;TZID=Asia/Tokyo:...` and
/// `DTSTART;VALUE=DATE:...`. Returns an empty string when there is no colon.
pub fn property_value(line: &str) -> &str {
    line.rfind(':').map(|idx| &line[idx + 1..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_decode_utc() {
        let ts = decode_datetime("20240102T090000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_floating() {
        let ts = decode_datetime("20230519T120000").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 5, 19, 12, 0, 0).unwrap());
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn test_decode_date_only() {
        let ts = decode_datetime("20140220").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2014, 2, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_round_trip_each_shape() {
        for (value, format) in [
            ("20241231T235959Z", UTC_FORMAT),
            ("20240229T081500", FLOATING_FORMAT),
            ("20240103", DATE_FORMAT),
        ] {
            let ts = decode_datetime(value).unwrap();
            assert_eq!(ts.format(format).to_string(), value);
        }
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(decode_datetime(""), Err(DatetimeError::EmptyValue));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            decode_datetime("2024-01-02"),
            Err(DatetimeError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            decode_datetime("0900"),
            Err(DatetimeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(
            decode_datetime("20241345T090000Z"),
            Err(DatetimeError::Malformed { .. })
        ));
        assert!(matches!(
            decode_datetime("2024010X"),
            Err(DatetimeError::Malformed { .. })
        ));
        // Fractional/offset suffixes are not part of the accepted shapes
        assert!(matches!(
            decode_datetime("20240102T090000+0900"),
            Err(DatetimeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_property_value() {
        assert_eq!(property_value("DTSTART:20240102T090000Z"), "20240102T090000Z");
        assert_eq!(
            property_value("DTSTART;TZID=Asia/Tokyo:20230519T120000"),
            "20230519T120000"
        );
        assert_eq!(property_value("DTSTART;VALUE=DATE:20140220"), "20140220");
        assert_eq!(property_value("DTSTART"), "");
        assert_eq!(property_value("DTEND:"), "");
    }
}
