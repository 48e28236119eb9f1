//! The [`TextValue`] capability: how a value type is written into an entry
//! line and read back out of one.
//!
//! The format has no quoting or escaping, so the text form of a value must
//! be a single line with no surrounding whitespace and no trailing comma.
//! Encoding enforces this up front instead of letting a later load read back
//! something different.

use crate::error::{FormatError, Result};

/// A value that can be stored in a block entry.
///
/// `decode(encode(v))` must yield a value equal to `v` for every value the
/// implementation accepts in `encode`.
pub trait TextValue: Sized {
    /// Render the value as entry text.
    fn encode(&self) -> Result<String>;

    /// Parse entry text back into a value.
    fn decode(text: &str) -> Result<Self>;
}

/// Check that `text` can sit on the right-hand side of an entry line and be
/// read back unchanged.
pub fn check_encodable(text: &str) -> Result<()> {
    let reason = if text.contains(['\n', '\r']) {
        "contains a line break"
    } else if text.trim() != text {
        "has leading or trailing whitespace"
    } else if text.ends_with(',') {
        "ends with the entry separator ','"
    } else {
        return Ok(());
    };
    Err(FormatError::UnencodableValue {
        text: text.to_string(),
        reason: reason.into(),
    })
}

macro_rules! impl_text_value_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TextValue for $ty {
                fn encode(&self) -> Result<String> {
                    let text = self.to_string();
                    check_encodable(&text)?;
                    Ok(text)
                }

                fn decode(text: &str) -> Result<Self> {
                    text.parse::<$ty>().map_err(|_| FormatError::InvalidValue {
                        type_name: stringify!($ty),
                        text: text.to_string(),
                    })
                }
            }
        )*
    };
}

impl_text_value_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl TextValue for String {
    fn encode(&self) -> Result<String> {
        check_encodable(self)?;
        Ok(self.clone())
    }

    fn decode(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}
