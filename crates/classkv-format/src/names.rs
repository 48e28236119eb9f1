//! Key and class-name validation.
//!
//! Entry lines have the shape `"key": value`, so a key may contain anything
//! except a double quote or a line break. Class names are only restricted
//! by the line structure: a header is a single `(name)` line.

use crate::error::{FormatError, Result};

/// Characters that are forbidden anywhere in a key.
const FORBIDDEN_KEY_CHARS: &[char] = &['"', '\n', '\r'];

/// Characters that are forbidden anywhere in a class name.
const FORBIDDEN_CLASS_CHARS: &[char] = &['\n', '\r'];

/// Validate an entry key, returning `Ok(())` if it can be rendered and
/// parsed back unchanged.
///
/// # Examples
///
/// ```
/// use classkv_format::names::validate_key;
///
/// assert!(validate_key("cat").is_ok());
/// assert!(validate_key("ratio: a/b").is_ok());
/// assert!(validate_key("").is_ok());
/// assert!(validate_key("say \"hi\"").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    for ch in FORBIDDEN_KEY_CHARS {
        if key.contains(*ch) {
            return Err(FormatError::InvalidKey {
                key: key.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}

/// Validate a class name for use in a block header.
///
/// The empty name is a legal, distinct class. Parentheses and colons are
/// allowed since headers are matched on the whole line.
pub fn validate_class_name(name: &str) -> Result<()> {
    for ch in FORBIDDEN_CLASS_CHARS {
        if name.contains(*ch) {
            return Err(FormatError::InvalidClassName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}
