//! Rendering and parsing of class blocks.
//!
//! A block is the text form of one class:
//!
//! ```text
//! (Animals)
//! {
//! 	"cat": 4,
//! 	"dog": 3
//! }
//! ```
//!
//! A document is any number of blocks, one after another. Blocks for the
//! same class may repeat; later entries win.

use tracing::trace;

use crate::error::Result;
use crate::line::Line;
use crate::names::{validate_class_name, validate_key};
use crate::value::TextValue;

/// One entry read out of a document, before value decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// The class selected by the nearest preceding header.
    pub class: &'a str,
    /// The entry key.
    pub key: &'a str,
    /// The raw value text, to be passed to [`TextValue::decode`].
    pub value: &'a str,
}

/// Render a single class block.
///
/// Entries are written in iteration order; callers pass a sorted map to get
/// the canonical layout. The result has no trailing newline.
pub fn render_block<'a, K, T, I>(class: &str, entries: I) -> Result<String>
where
    K: AsRef<str> + 'a,
    T: TextValue + 'a,
    I: IntoIterator<Item = (&'a K, &'a T)>,
{
    validate_class_name(class)?;

    let mut lines = Vec::new();
    for (key, value) in entries {
        let key = key.as_ref();
        validate_key(key)?;
        lines.push(format!("\t\"{key}\": {}", value.encode()?));
    }

    Ok(format!("({class})\n{{\n{}\n}}", lines.join(",\n")))
}

/// Parse a document into its entry records, in the order they appear.
///
/// Header lines switch the active class and entries before the first header
/// are dropped. Lines that are neither headers nor entries are ignored.
pub fn parse_document(text: &str) -> Vec<Record<'_>> {
    let mut active: Option<&str> = None;
    let mut records = Vec::new();

    for (number, line) in text.lines().enumerate() {
        match Line::classify(line) {
            Line::Header(name) => active = Some(name),
            Line::Entry { key, value } => match active {
                Some(class) => records.push(Record { class, key, value }),
                None => trace!(line = number + 1, "entry before any class header; skipped"),
            },
            Line::Other => {}
        }
    }

    records
}
