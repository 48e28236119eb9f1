//! Text block format for class-partitioned key-value data.
//!
//! Data is written as one block per class:
//!
//! ```text
//! (Animals)
//! {
//! 	"cat": 4,
//! 	"dog": 3
//! }
//! ```
//!
//! The format is line-oriented with no quoting or escaping. Instead of
//! escaping, every piece is checked before it is written: keys, class names
//! and value text that would not survive a round-trip are rejected with a
//! [`FormatError`].
//!
//! # Modules
//!
//! - [`error`]: Error types for format operations
//! - [`value`]: The [`TextValue`] encode/decode capability
//! - [`names`]: Key and class-name validation
//! - [`line`]: Structural line matching
//! - [`block`]: Block rendering and document parsing

pub mod block;
pub mod error;
pub mod line;
pub mod names;
pub mod value;

pub use block::{parse_document, render_block, Record};
pub use error::{FormatError, Result};
pub use line::Line;
pub use names::{validate_class_name, validate_key};
pub use value::TextValue;
