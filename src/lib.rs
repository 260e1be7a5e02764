//! # nullable-scalars
//!
//! Nullable scalar value types that interoperate with two independent
//! serialization targets: a relational database's value protocol and a JSON
//! document protocol.
//!
//! The crate provides four structurally parallel value types:
//! - `NullableString`: opaque text
//! - `NullableDate`: calendar date (`YYYY-MM-DD`)
//! - `NullableTimeOfDay`: clock time at minute precision (`HH:MM`)
//! - `NullableTimestamp`: UTC instant at second precision (RFC 3339)
//!
//! Each type implements the same two codec pairs ([`DriverCodec`] for the
//! database side, [`DocumentCodec`] for the document side) and propagates the
//! tri-state "no value" condition (SQL NULL / JSON null) through every
//! conversion path without conflating it with a present-but-empty value.
//!
//! All operations are synchronous pure functions of their inputs plus the
//! instance being read or written; the crate performs no I/O and holds no
//! shared state. Decoding mutates the receiver in place and requires
//! exclusive access for the duration of the call.
//!
//! ## Example Usage
//!
//! ```rust
//! use nullable_scalars::{DocumentCodec, DriverCodec, DriverValue, NullableDate};
//!
//! let mut date = NullableDate::null();
//! date.decode_driver(DriverValue::Text("2024-03-05".to_string())).unwrap();
//! assert!(date.is_present());
//! assert_eq!(date.encode_document(), b"\"2024-03-05\"");
//!
//! date.decode_document(b"null").unwrap();
//! assert!(date.is_empty());
//! assert_eq!(date.encode_driver(), DriverValue::Null);
//! ```

pub mod codec;
pub mod driver;
pub mod errors;
pub mod types;

// Re-export commonly used types at crate root
pub use codec::{DocumentCodec, DriverCodec};
pub use driver::DriverValue;
pub use errors::{Result, ScalarCodecError};
pub use types::{NullableDate, NullableString, NullableTimeOfDay, NullableTimestamp};
