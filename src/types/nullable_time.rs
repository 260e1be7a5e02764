//! Nullable time-of-day at minute precision.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{DocumentCodec, DriverCodec};
use crate::driver::DriverValue;
use crate::errors::{Result, ScalarCodecError};
use crate::types::{document_text, utf8_text};

const TIME_FORMAT: &str = "%H:%M";
const TIME_PATTERN: &str = "HH:MM";
/// Significant length of time-of-day text; anything past it is ignored.
const TIME_TEXT_LEN: usize = 5;
const TARGET: &str = "time";

/// Nullable clock time without a date.
///
/// Only hour and minute are kept; seconds and sub-second components are
/// truncated on every entry path. Canonical text form is 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullableTimeOfDay(Option<NaiveTime>);

impl NullableTimeOfDay {
    /// Absent time (SQL NULL / JSON null).
    #[inline]
    pub fn null() -> Self {
        Self(None)
    }

    /// Present time keeping only the hour and minute of `time`.
    #[inline]
    pub fn new(time: NaiveTime) -> Self {
        Self(Some(truncate_to_minute(time)))
    }

    /// Present time keeping only the hour and minute of `datetime`'s clock.
    #[inline]
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.time())
    }

    /// The canonical time, if present. Seconds are always zero.
    #[inline]
    pub fn time(&self) -> Option<NaiveTime> {
        self.0
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True when no time is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Parse canonical `HH:MM` text. The empty string clears to absent.
    fn decode_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.0 = None;
            return Ok(());
        }
        let parsed = parse_time(text)?;
        self.0 = Some(parsed);
        Ok(())
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).expect("clock fields are in range")
}

fn parse_time(text: &str) -> Result<NaiveTime> {
    // Text longer than HH:MM keeps only the leading five characters, so
    // stored values like "09:15:30" or "09:15+02:00" parse as 09:15.
    let significant = if text.len() > TIME_TEXT_LEN {
        text.get(..TIME_TEXT_LEN).ok_or_else(invalid_format)?
    } else {
        text
    };
    if significant.len() != TIME_TEXT_LEN {
        return Err(invalid_format());
    }
    NaiveTime::parse_from_str(significant, TIME_FORMAT).map_err(|_| invalid_format())
}

fn invalid_format() -> ScalarCodecError {
    ScalarCodecError::InvalidFormat {
        target: TARGET,
        expected: TIME_PATTERN,
    }
}

impl DriverCodec for NullableTimeOfDay {
    fn decode_driver(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => {
                self.0 = None;
                Ok(())
            }
            DriverValue::DateTime(dt) => {
                self.0 = Some(truncate_to_minute(dt.time()));
                Ok(())
            }
            DriverValue::Text(text) => self.decode_text(&text),
            DriverValue::Bytes(bytes) => self.decode_text(utf8_text(&bytes, TARGET)?),
            other => {
                tracing::trace!(kind = other.kind(), "unsupported driver value for time");
                Err(ScalarCodecError::UnsupportedSourceType {
                    target: TARGET,
                    kind: other.kind(),
                })
            }
        }
    }

    fn encode_driver(&self) -> DriverValue {
        match self.0 {
            Some(time) => DriverValue::Text(time.format(TIME_FORMAT).to_string()),
            None => DriverValue::Null,
        }
    }
}

impl DocumentCodec for NullableTimeOfDay {
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
            Some(time) => format!("\"{}\"", time.format(TIME_FORMAT)).into_bytes(),
            None => b"null".to_vec(),
        }
    }
}

impl fmt::Display for NullableTimeOfDay {
    /// `HH:MM` when present, the empty string otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(time) => write!(f, "{}", time.format(TIME_FORMAT)),
            None => Ok(()),
        }
    }
}

impl From<NaiveTime> for NullableTimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self::new(time)
    }
}

impl From<NaiveDateTime> for NullableTimeOfDay {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_datetime(datetime)
    }
}

impl Serialize for NullableTimeOfDay {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(time) => serializer.collect_str(&time.format(TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullableTimeOfDay {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        let mut time = Self::null();
        if let Some(text) = text {
            time.decode_text(&text).map_err(serde::de::Error::custom)?;
        }
        Ok(time)
    }
}
