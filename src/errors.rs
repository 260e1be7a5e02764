//! Shared error types for scalar codec operations.
//!
//! Every decode failure is local and deterministic: the same input always
//! produces the same error, so callers must not retry. A failed decode never
//! leaves a half-written value behind; the receiver keeps its previous state.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScalarCodecError>;

/// Error raised by the driver-value and document codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarCodecError {
    /// The driver supplied a value kind the target type has no conversion for.
    #[error("cannot decode driver value of kind {kind} into {target}")]
    UnsupportedSourceType {
        /// Name of the type being decoded into.
        target: &'static str,
        /// Name of the offending driver value kind.
        kind: &'static str,
    },

    /// Text input does not match the type's canonical grammar.
    #[error("invalid {target} format, expected {expected}")]
    InvalidFormat {
        target: &'static str,
        /// Human-readable pattern, e.g. `YYYY-MM-DD`.
        expected: &'static str,
    },

    /// Document payload is not valid literal syntax for the target type.
    #[error("malformed document value for {target}: {reason}")]
    MalformedDocumentValue {
        target: &'static str,
        reason: String,
    },
}
