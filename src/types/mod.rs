//! Nullable scalar value types.
//!
//! Four structurally parallel types, each wrapping an explicit tagged
//! optional around its canonical value:
//!
//! - [`NullableString`]: opaque text, stored verbatim
//! - [`NullableDate`]: calendar date, canonical text `YYYY-MM-DD`
//! - [`NullableTimeOfDay`]: clock time at minute precision, canonical text `HH:MM`
//! - [`NullableTimestamp`]: UTC instant at second precision, canonical text RFC 3339
//!
//! Truncation (whole days, whole minutes, whole seconds) happens on every
//! entry path, so instances built from equivalent inputs via different paths
//! compare equal.

pub mod nullable_date;
pub mod nullable_string;
pub mod nullable_time;
pub mod nullable_timestamp;

pub use nullable_date::NullableDate;
pub use nullable_string::NullableString;
pub use nullable_time::NullableTimeOfDay;
pub use nullable_timestamp::NullableTimestamp;

use crate::errors::{Result, ScalarCodecError};

/// Validate a driver byte value as UTF-8 before handing it to a text parser.
pub(crate) fn utf8_text<'a>(bytes: &'a [u8], target: &'static str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| ScalarCodecError::InvalidFormat {
        target,
        expected: "UTF-8 text",
    })
}

/// Extract the significant text of a document literal.
///
/// Returns `None` for the `null` literal and the two-character `""` literal,
/// both of which decode to the absent state. Otherwise strips one layer of
/// surrounding quotes, if any, and returns the remaining text unparsed.
pub(crate) fn document_text<'a>(data: &'a [u8], target: &'static str) -> Result<Option<&'a str>> {
    let text = std::str::from_utf8(data).map_err(|e| ScalarCodecError::MalformedDocumentValue {
        target,
        reason: e.to_string(),
    })?;
    if text == "null" || text == "\"\"" {
        return Ok(None);
    }
    let stripped = if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    };
    Ok(Some(stripped))
}
