//! Nullable calendar date without a time-of-day component.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{DocumentCodec, DriverCodec};
use crate::driver::DriverValue;
use crate::errors::{Result, ScalarCodecError};
use crate::types::{document_text, utf8_text};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_PATTERN: &str = "YYYY-MM-DD";
const TARGET: &str = "date";

/// Nullable calendar date.
///
/// Any time-of-day information on input is discarded, so two dates built from
/// different entry paths compare equal whenever they name the same calendar
/// day. Canonical text form is `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullableDate(Option<NaiveDate>);

impl NullableDate {
    /// Absent date (SQL NULL / JSON null).
    #[inline]
    pub fn null() -> Self {
        Self(None)
    }

    /// Present date for the given calendar day.
    #[inline]
    pub fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Present date for the calendar day of `datetime`, discarding the clock.
    #[inline]
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(Some(datetime.date()))
    }

    /// The canonical day, if present.
    #[inline]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True when no date is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Parse canonical `YYYY-MM-DD` text. The empty string clears to absent.
    fn decode_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.0 = None;
            return Ok(());
        }
        let parsed = parse_date(text)?;
        self.0 = Some(parsed);
        Ok(())
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    // Exact match only: the pattern is fixed-width, so a length check plus
    // chrono's full-consumption parse rejects padding and trailing content.
    if text.len() != DATE_PATTERN.len() {
        return Err(invalid_format());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid_format())
}

fn invalid_format() -> ScalarCodecError {
    ScalarCodecError::InvalidFormat {
        target: TARGET,
        expected: DATE_PATTERN,
    }
}

impl DriverCodec for NullableDate {
    fn decode_driver(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => {
                self.0 = None;
                Ok(())
            }
            DriverValue::DateTime(dt) => {
                self.0 = Some(dt.date_naive());
                Ok(())
            }
            DriverValue::Text(text) => self.decode_text(&text),
            DriverValue::Bytes(bytes) => self.decode_text(utf8_text(&bytes, TARGET)?),
            other => {
                tracing::trace!(kind = other.kind(), "unsupported driver value for date");
                Err(ScalarCodecError::UnsupportedSourceType {
                    target: TARGET,
                    kind: other.kind(),
                })
            }
        }
    }

    fn encode_driver(&self) -> DriverValue {
        match self.0 {
            Some(date) => DriverValue::Text(date.format(DATE_FORMAT).to_string()),
            None => DriverValue::Null,
        }
    }
}

impl DocumentCodec for NullableDate {
    fn decode_document(&mut self, data: &[u8]) -> Result<()> {
        match document_text(data, TARGET)? {
            Some(text) => self.decode_text(text),
            None => {
                self.0 = None;
                Ok(())
            }
        }
    }

    fn encode_document(&self) -> Vec<u8> {
        match self.0 {
            Some(date) => format!("\"{}\"", date.format(DATE_FORMAT)).into_bytes(),
            None => b"null".to_vec(),
        }
    }
}

impl fmt::Display for NullableDate {
    /// `YYYY-MM-DD` when present, the empty string otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl From<NaiveDate> for NullableDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl From<NaiveDateTime> for NullableDate {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_datetime(datetime)
    }
}

impl Serialize for NullableDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullableDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        let mut date = Self::null();
        if let Some(text) = text {
            date.decode_text(&text).map_err(serde::de::Error::custom)?;
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn march_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_from_datetime_truncates_to_day() {
        let datetime = march_5().and_time(NaiveTime::from_hms_opt(23, 59, 58).unwrap());
        let date = NullableDate::from_datetime(datetime);
        assert_eq!(date, NullableDate::new(march_5()));
    }

    #[test]
    fn test_decode_text_exact_format() {
        let mut date = NullableDate::null();
        date.decode_driver(DriverValue::Text("2024-03-05".to_string())).unwrap();
        assert_eq!(date.date(), Some(march_5()));
    }

    #[test]
    fn test_decode_empty_text_is_absent_not_error() {
        let mut date = NullableDate::new(march_5());
        date.decode_driver(DriverValue::Text(String::new())).unwrap();
        assert!(date.is_empty());
    }

    #[test]
    fn test_decode_rejects_out_of_range_fields() {
        let mut date = NullableDate::null();
        let err = date.decode_driver(DriverValue::Text("13-99-99".to_string())).unwrap_err();
        assert_eq!(
            err,
            ScalarCodecError::InvalidFormat {
                target: "date",
                expected: "YYYY-MM-DD"
            }
        );
    }

    #[test]
    fn test_decode_rejects_lenient_spellings() {
        for bad in ["2024-3-5", "2024/03/05", "2024-03-05T00:00:00", "05-03-2024"] {
            let mut date = NullableDate::null();
            assert!(
                date.decode_driver(DriverValue::Text(bad.to_string())).is_err(),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_numeric_kind() {
        let mut date = NullableDate::null();
        let err = date.decode_driver(DriverValue::Float64(1.5)).unwrap_err();
        assert_eq!(
            err,
            ScalarCodecError::UnsupportedSourceType {
                target: "date",
                kind: "Float64"
            }
        );
    }

    #[test]
    fn test_failed_decode_keeps_previous_state() {
        let mut date = NullableDate::new(march_5());
        assert!(date.decode_driver(DriverValue::Text("garbage".to_string())).is_err());
        assert_eq!(date.date(), Some(march_5()));
    }

    #[test]
    fn test_driver_round_trip() {
        let original = NullableDate::new(march_5());
        let mut decoded = NullableDate::null();
        decoded.decode_driver(original.encode_driver()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_document_round_trip() {
        let original = NullableDate::new(march_5());
        let encoded = original.encode_document();
        assert_eq!(encoded, b"\"2024-03-05\"");

        let mut decoded = NullableDate::null();
        decoded.decode_document(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_document_null_and_empty_literals_are_absent() {
        for literal in [&b"null"[..], b"\"\""] {
            let mut date = NullableDate::new(march_5());
            date.decode_document(literal).unwrap();
            assert!(date.is_empty());
        }
    }

    #[test]
    fn test_document_accepts_unquoted_text() {
        let mut date = NullableDate::null();
        date.decode_document(b"2024-03-05").unwrap();
        assert_eq!(date.date(), Some(march_5()));
    }

    #[test]
    fn test_display() {
        assert_eq!(NullableDate::new(march_5()).to_string(), "2024-03-05");
        assert_eq!(NullableDate::null().to_string(), "");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&NullableDate::new(march_5())).unwrap();
        assert_eq!(json, "\"2024-03-05\"");
        let back: NullableDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date(), Some(march_5()));

        let absent: NullableDate = serde_json::from_str("null").unwrap();
        assert!(absent.is_empty());
        let empty: NullableDate = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_empty());
    }
}
