//! Nullable opaque text value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{DocumentCodec, DriverCodec};
use crate::driver::DriverValue;
use crate::errors::{Result, ScalarCodecError};

const TARGET: &str = "string";

/// Nullable text value.
///
/// Text is stored verbatim; no transformation happens between the external
/// and internal form. Absence (SQL NULL / JSON null) is distinct from the
/// present-but-empty string everywhere except [`NullableString::is_empty`],
/// which deliberately conflates the two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NullableString(Option<String>);

impl NullableString {
    /// Absent value (SQL NULL / JSON null).
    #[inline]
    pub fn null() -> Self {
        Self(None)
    }

    /// Present value holding `text` verbatim.
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    /// Borrowed view of the text. Absent maps to `None`.
    #[inline]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Consumes the wrapper and returns the inner text, if present.
    #[inline]
    pub fn into_string(self) -> Option<String> {
        self.0
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True when absent or when the text is the empty string. Both render as
    /// nothing, which is the distinction callers of this method care about.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.as_deref().map_or(true, str::is_empty)
    }
}

impl DriverCodec for NullableString {
    fn decode_driver(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => {
                self.0 = None;
                Ok(())
            }
            DriverValue::Text(text) => {
                self.0 = Some(text);
                Ok(())
            }
            DriverValue::Bytes(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| ScalarCodecError::InvalidFormat {
                    target: TARGET,
                    expected: "UTF-8 text",
                })?;
                self.0 = Some(text);
                Ok(())
            }
            other => {
                tracing::trace!(kind = other.kind(), "unsupported driver value for string");
                Err(ScalarCodecError::UnsupportedSourceType {
                    target: TARGET,
                    kind: other.kind(),
                })
            }
        }
    }

    fn encode_driver(&self) -> DriverValue {
        match &self.0 {
            Some(text) => DriverValue::Text(text.clone()),
            None => DriverValue::Null,
        }
    }
}

impl DocumentCodec for NullableString {
    fn decode_document(&mut self, data: &[u8]) -> Result<()> {
        if data == b"null" {
            self.0 = None;
            return Ok(());
        }
        let text: String = serde_json::from_slice(data).map_err(|e| {
            ScalarCodecError::MalformedDocumentValue {
                target: TARGET,
                reason: e.to_string(),
            }
        })?;
        self.0 = Some(text);
        Ok(())
    }

    fn encode_document(&self) -> Vec<u8> {
        match &self.0 {
            Some(text) => serde_json::Value::String(text.clone()).to_string().into_bytes(),
            None => b"null".to_vec(),
        }
    }
}

impl fmt::Display for NullableString {
    /// The text when present, the empty string otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}

impl From<String> for NullableString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for NullableString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl Serialize for NullableString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullableString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(Option::<String>::deserialize(deserializer)?))
    }
}
