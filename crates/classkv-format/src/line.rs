//! Structural line matching for block text.
//!
//! Each line of a document is one of:
//!
//! ```text
//! (Animals)        header: selects the class for following entries
//! {                 ignored
//! 	"cat": 4,     entry: quoted key, colon, value, optional separator
//! }                 ignored
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"^\s*\((.*)\)\s*$").expect("header pattern compiles");
    static ref ENTRY: Regex =
        Regex::new(r#"^\s*"([^"]*)":\s?(.*?),?\s*$"#).expect("entry pattern compiles");
}

/// A classified line of block text, borrowing from the source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// `(name)`: starts a new class block.
    Header(&'a str),
    /// `"key": value`: an entry within the active class.
    Entry { key: &'a str, value: &'a str },
    /// Braces, blank lines and anything unrecognized.
    Other,
}

impl<'a> Line<'a> {
    /// Classify a single line (without its line terminator).
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = ENTRY.captures(line) {
            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                return Line::Entry {
                    key: key.as_str(),
                    value: value.as_str(),
                };
            }
        }
        if let Some(name) = HEADER.captures(line).and_then(|caps| caps.get(1)) {
            return Line::Header(name.as_str());
        }
        Line::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines() {
        assert_eq!(Line::classify("(Animals)"), Line::Header("Animals"));
        assert_eq!(Line::classify("()"), Line::Header(""));
        assert_eq!(Line::classify("  (spaced)  "), Line::Header("spaced"));
        assert_eq!(Line::classify("(a (b): c)"), Line::Header("a (b): c"));
    }

    #[test]
    fn entry_lines() {
        assert_eq!(
            Line::classify("\t\"cat\": 4,"),
            Line::Entry { key: "cat", value: "4" }
        );
        assert_eq!(
            Line::classify("\t\"dog\": 3"),
            Line::Entry { key: "dog", value: "3" }
        );
        assert_eq!(
            Line::classify("\t\"a:b\": x: y,"),
            Line::Entry { key: "a:b", value: "x: y" }
        );
        assert_eq!(
            Line::classify("\t\"empty\": "),
            Line::Entry { key: "empty", value: "" }
        );
    }

    #[test]
    fn entry_tolerates_carriage_return() {
        assert_eq!(
            Line::classify("\t\"cat\": 4,\r"),
            Line::Entry { key: "cat", value: "4" }
        );
    }

    #[test]
    fn other_lines() {
        assert_eq!(Line::classify("{"), Line::Other);
        assert_eq!(Line::classify("}"), Line::Other);
        assert_eq!(Line::classify(""), Line::Other);
        assert_eq!(Line::classify("cat: 4"), Line::Other);
        assert_eq!(Line::classify("\t\"unterminated: 4"), Line::Other);
    }
}
