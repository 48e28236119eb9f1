//! Error types for store operations.

use classkv_format::FormatError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be opened, read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The class has never been populated, or holds no entries where one
    /// is required.
    #[error("class not found: {class:?}")]
    NotFound { class: String },

    /// Indexed lookup past the end of a class, or into a missing class.
    #[error("index {index} out of range for class {class:?} of length {len}")]
    IndexOutOfRange {
        class: String,
        index: usize,
        len: usize,
    },

    /// A key, class name or value cannot be represented in the text format.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub(crate) fn not_found(class: &str) -> Self {
        StoreError::NotFound {
            class: class.to_string(),
        }
    }

    /// Returns true if this is an I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }

    /// Returns true if a class lookup found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if an indexed lookup fell outside the class.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, StoreError::IndexOutOfRange { .. })
    }
}
