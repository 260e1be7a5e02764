//! Codec traits implemented by every nullable scalar type.
//!
//! Each type carries exactly two codec pairs: one against the database value
//! protocol (`DriverCodec`) and one against the JSON document protocol
//! (`DocumentCodec`). Decode replaces the receiver's state in place and
//! requires exclusive access for the duration of the call; a failed decode
//! leaves the previous state untouched.

use crate::driver::DriverValue;
use crate::errors::Result;

/// Bidirectional conversion against the database value protocol.
pub trait DriverCodec: Sized {
    /// Decode a driver value into this instance, replacing its state.
    ///
    /// `DriverValue::Null` always decodes to the absent state. Kinds outside
    /// the type's accepted set fail with `UnsupportedSourceType`.
    fn decode_driver(&mut self, value: DriverValue) -> Result<()>;

    /// Encode this instance as a driver value. Absent encodes to
    /// `DriverValue::Null`.
    fn encode_driver(&self) -> DriverValue;
}

/// Bidirectional conversion against the JSON document protocol.
pub trait DocumentCodec: Sized {
    /// Decode a raw document literal into this instance, replacing its state.
    ///
    /// The literal `null` always decodes to the absent state.
    fn decode_document(&mut self, data: &[u8]) -> Result<()>;

    /// Encode this instance as a document literal: `null` when absent,
    /// otherwise a well-formed JSON literal.
    fn encode_document(&self) -> Vec<u8>;
}
