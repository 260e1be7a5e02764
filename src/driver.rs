//! Database value protocol boundary.
//!
//! `DriverValue` is the scalar exchanged with the driver layer. The driver
//! itself (connections, statements, row buffers) lives outside this crate;
//! adapters map their native scalar representation onto this enum at the
//! boundary and back.

use chrono::{DateTime, FixedOffset};

/// A single scalar value as seen by the database driver layer.
///
/// Covers the kinds a relational driver can hand over for a nullable column.
/// The nullable types in this crate accept only a subset of these kinds each;
/// anything else is rejected with `UnsupportedSourceType` naming the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL NULL.
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    /// Text column value.
    Text(String),
    /// Raw byte column value, commonly UTF-8 text from drivers that do not
    /// distinguish text from blobs.
    Bytes(Vec<u8>),
    /// Native temporal value with the offset the driver reported.
    DateTime(DateTime<FixedOffset>),
}

impl DriverValue {
    /// Name of this value kind, used in decode error diagnostics.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            DriverValue::Null => "Null",
            DriverValue::Boolean(_) => "Boolean",
            DriverValue::Int64(_) => "Int64",
            DriverValue::Float64(_) => "Float64",
            DriverValue::Text(_) => "Text",
            DriverValue::Bytes(_) => "Bytes",
            DriverValue::DateTime(_) => "DateTime",
        }
    }

    /// Is this the SQL NULL marker?
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }
}
