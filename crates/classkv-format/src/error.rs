//! Error types for the text block format.

use thiserror::Error;

/// Errors that can occur while encoding or decoding block text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The key cannot be written as a quoted entry key.
    #[error("invalid key: {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The class name cannot be written as a block header.
    #[error("invalid class name: {name:?}: {reason}")]
    InvalidClassName { name: String, reason: String },

    /// The value's text form would not survive a render/parse round-trip.
    #[error("value cannot be encoded: {text:?}: {reason}")]
    UnencodableValue { text: String, reason: String },

    /// The text could not be decoded into the target value type.
    #[error("invalid {type_name} value: {text:?}")]
    InvalidValue {
        type_name: &'static str,
        text: String,
    },
}

/// Convenience type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;
