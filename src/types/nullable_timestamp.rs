//! Nullable date-time instant, UTC-normalized at second precision.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{DocumentCodec, DriverCodec};
use crate::driver::DriverValue;
use crate::errors::{Result, ScalarCodecError};
use crate::types::{document_text, utf8_text, NullableDate, NullableTimeOfDay};

const TIMESTAMP_PATTERN: &str = "RFC3339";
const TARGET: &str = "timestamp";

/// Nullable instant in time.
///
/// Every entry path normalizes to UTC and truncates to whole seconds, so
/// instances built from equivalent inputs compare equal regardless of the
/// offset or sub-second precision they arrived with. Canonical text form is
/// RFC 3339 in UTC, e.g. `2024-01-02T15:04:05Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullableTimestamp(Option<DateTime<Utc>>);

impl NullableTimestamp {
    /// Absent timestamp (SQL NULL / JSON null).
    #[inline]
    pub fn null() -> Self {
        Self(None)
    }

    /// Present instant, truncated to whole seconds.
    #[inline]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Some(instant.trunc_subsecs(0)))
    }

    /// Present instant from an offset-carrying value, normalized to UTC and
    /// truncated to whole seconds.
    #[inline]
    pub fn from_offset(instant: DateTime<FixedOffset>) -> Self {
        Self::new(instant.with_timezone(&Utc))
    }

    /// Compose a timestamp from a calendar day and a time-of-day, read as a
    /// UTC wall clock.
    ///
    /// Absence propagates: the result is absent unless both inputs are
    /// present. The time contributes hour and minute; seconds are zero.
    pub fn combine(date: &NullableDate, time: &NullableTimeOfDay) -> Self {
        match (date.date(), time.time()) {
            (Some(date), Some(time)) => Self(Some(date.and_time(time).and_utc())),
            _ => Self(None),
        }
    }

    /// The canonical instant, if present. Always UTC with zero sub-seconds.
    #[inline]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True when no instant is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Parse RFC 3339 text. The empty string clears to absent.
    fn decode_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.0 = None;
            return Ok(());
        }
        let parsed = parse_timestamp(text)?;
        self.0 = Some(parsed);
        Ok(())
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|instant| instant.with_timezone(&Utc).trunc_subsecs(0))
        .map_err(|_| ScalarCodecError::InvalidFormat {
            target: TARGET,
            expected: TIMESTAMP_PATTERN,
        })
}

fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl DriverCodec for NullableTimestamp {
    fn decode_driver(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => {
                self.0 = None;
                Ok(())
            }
            DriverValue::DateTime(dt) => {
                self.0 = Some(dt.with_timezone(&Utc).trunc_subsecs(0));
                Ok(())
            }
            DriverValue::Text(text) => self.decode_text(&text),
            DriverValue::Bytes(bytes) => self.decode_text(utf8_text(&bytes, TARGET)?),
            other => {
                tracing::trace!(kind = other.kind(), "unsupported driver value for timestamp");
                Err(ScalarCodecError::UnsupportedSourceType {
                    target: TARGET,
                    kind: other.kind(),
                })
            }
        }
    }

    /// Unlike the text-encoding types, the driver receives a native temporal
    /// value here, already normalized and truncated.
    fn encode_driver(&self) -> DriverValue {
        match self.0 {
            Some(instant) => DriverValue::DateTime(instant.with_timezone(&Utc.fix())),
            None => DriverValue::Null,
        }
    }
}

impl DocumentCodec for NullableTimestamp {
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
            Some(instant) => format!("\"{}\"", format_timestamp(instant)).into_bytes(),
            None => b"null".to_vec(),
        }
    }
}

impl fmt::Display for NullableTimestamp {
    /// RFC 3339 UTC text when present, the empty string otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(instant) => f.write_str(&format_timestamp(instant)),
            None => Ok(()),
        }
    }
}

impl From<DateTime<Utc>> for NullableTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl From<DateTime<FixedOffset>> for NullableTimestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::from_offset(instant)
    }
}

impl Serialize for NullableTimestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(instant) => serializer.serialize_str(&format_timestamp(instant)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullableTimestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        let mut timestamp = Self::null();
        if let Some(text) = text {
            timestamp.decode_text(&text).map_err(serde::de::Error::custom)?;
        }
        Ok(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_new_truncates_sub_seconds() {
        let sub_second = Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 30).unwrap()
            + chrono::Duration::milliseconds(500);
        let truncated = NullableTimestamp::new(sub_second);
        assert_eq!(truncated, NullableTimestamp::new(instant("2024-03-05T09:15:30Z")));
    }

    #[test]
    fn test_decode_text_normalizes_offset_to_utc() {
        let mut ts = NullableTimestamp::null();
        ts.decode_driver(DriverValue::Text("2024-03-05T11:15:30+02:00".to_string())).unwrap();
        assert_eq!(ts.instant(), Some(instant("2024-03-05T09:15:30Z")));
        assert_eq!(ts.to_string(), "2024-03-05T09:15:30Z");
    }

    #[test]
    fn test_decode_text_truncates_fractional_seconds() {
        let mut ts = NullableTimestamp::null();
        ts.decode_driver(DriverValue::Text("2024-03-05T09:15:30.500Z".to_string())).unwrap();
        assert_eq!(ts.instant(), Some(instant("2024-03-05T09:15:30Z")));
    }

    #[test]
    fn test_decode_empty_text_is_absent_not_error() {
        let mut ts = NullableTimestamp::new(instant("2024-03-05T09:15:30Z"));
        ts.decode_driver(DriverValue::Text(String::new())).unwrap();
        assert!(ts.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_rfc3339_text() {
        for bad in ["2024-03-05", "09:15:30", "yesterday", "2024-03-05 09:15:30"] {
            let mut ts = NullableTimestamp::null();
            let err = ts.decode_driver(DriverValue::Text(bad.to_string())).unwrap_err();
            assert_eq!(
                err,
                ScalarCodecError::InvalidFormat {
                    target: "timestamp",
                    expected: "RFC3339"
                },
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_numeric_kind() {
        let mut ts = NullableTimestamp::null();
        let err = ts.decode_driver(DriverValue::Int64(1709629530)).unwrap_err();
        assert_eq!(
            err,
            ScalarCodecError::UnsupportedSourceType {
                target: "timestamp",
                kind: "Int64"
            }
        );
    }

    #[test]
    fn test_driver_round_trip_emits_native_temporal() {
        let original = NullableTimestamp::new(instant("2024-03-05T09:15:30Z"));
        let encoded = original.encode_driver();
        assert!(matches!(encoded, DriverValue::DateTime(_)));

        let mut decoded = NullableTimestamp::null();
        decoded.decode_driver(encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_driver_datetime_input_normalized_and_truncated() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 3, 5, 11, 15, 30).unwrap();
        let mut ts = NullableTimestamp::null();
        ts.decode_driver(DriverValue::DateTime(local)).unwrap();
        assert_eq!(ts.instant(), Some(instant("2024-03-05T09:15:30Z")));
    }

    #[test]
    fn test_document_round_trip() {
        let original = NullableTimestamp::new(instant("2024-03-05T09:15:30Z"));
        let encoded = original.encode_document();
        assert_eq!(encoded, b"\"2024-03-05T09:15:30Z\"");

        let mut decoded = NullableTimestamp::null();
        decoded.decode_document(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_document_null_and_empty_literals_are_absent() {
        for literal in [&b"null"[..], b"\"\""] {
            let mut ts = NullableTimestamp::new(instant("2024-03-05T09:15:30Z"));
            ts.decode_document(literal).unwrap();
            assert!(ts.is_empty());
        }
    }

    #[test]
    fn test_failed_decode_keeps_previous_state() {
        let before = instant("2024-03-05T09:15:30Z");
        let mut ts = NullableTimestamp::new(before);
        assert!(ts.decode_document(b"\"not a timestamp\"").is_err());
        assert_eq!(ts.instant(), Some(before));
    }

    #[test]
    fn test_combine_present_inputs() {
        let date = NullableDate::new(chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let time = NullableTimeOfDay::new(chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        let ts = NullableTimestamp::combine(&date, &time);
        assert_eq!(ts.instant(), Some(instant("2024-03-05T09:15:00Z")));
    }

    #[test]
    fn test_combine_propagates_absence() {
        let date = NullableDate::new(chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let time = NullableTimeOfDay::new(chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap());

        assert!(NullableTimestamp::combine(&NullableDate::null(), &time).is_empty());
        assert!(NullableTimestamp::combine(&date, &NullableTimeOfDay::null()).is_empty());
        assert!(NullableTimestamp::combine(&NullableDate::null(), &NullableTimeOfDay::null())
            .is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let original = NullableTimestamp::new(instant("2024-03-05T09:15:30Z"));
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"2024-03-05T09:15:30Z\"");
        let back: NullableTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);

        let absent: NullableTimestamp = serde_json::from_str("null").unwrap();
        assert!(absent.is_empty());
    }
}
