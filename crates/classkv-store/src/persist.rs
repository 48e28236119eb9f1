//! Saving classes to, and loading whole stores from, block text files.
//!
//! `save_class` writes one class's block; several calls in
//! [`SaveMode::Append`] build up a multi-class file. `load` reads every block
//! in a file and replaces the store's contents with them.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use classkv_format::{parse_document, TextValue};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::store::{ClassMap, ClassStore};

/// How `save` opens an existing file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Add the block after whatever the file already holds.
    #[default]
    Append,
    /// Discard the file's previous contents.
    Truncate,
}

/// Options for saving blocks to a file.
#[derive(Clone, Debug, Default)]
pub struct SaveOptions {
    /// Append to or truncate an existing file (default: append).
    pub mode: SaveMode,
    /// Create missing parent directories before opening (default: false).
    pub create_parent_dirs: bool,
}

impl SaveOptions {
    /// Options that truncate the target file.
    pub fn truncate() -> Self {
        Self {
            mode: SaveMode::Truncate,
            ..Self::default()
        }
    }
}

/// Open the save target according to `options`.
fn open_target(path: &Path, options: &SaveOptions) -> Result<File> {
    if options.create_parent_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(options.mode == SaveMode::Append)
        .truncate(options.mode == SaveMode::Truncate)
        .open(path)?;
    Ok(file)
}

/// Write `text` plus a trailing newline to `path`.
fn write_text(path: &Path, text: &str, options: &SaveOptions) -> Result<()> {
    let mut writer = BufWriter::new(open_target(path, options)?);
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Keep the lines of `bytes` that are valid UTF-8, dropping the rest.
fn decode_lines(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for (number, line) in bytes.split(|b| *b == b'\n').enumerate() {
        match std::str::from_utf8(line) {
            Ok(line) => {
                text.push_str(line);
                text.push('\n');
            }
            Err(_) => trace!(line = number + 1, "line is not valid UTF-8; skipped"),
        }
    }
    text
}

impl<T: TextValue> ClassStore<T> {
    /// Save one class's block to `path`.
    ///
    /// Only the named class is written. The block is rendered before the
    /// file is touched, so a missing class or unencodable entry leaves the
    /// file as it was.
    pub fn save_class(
        &self,
        name: &str,
        path: impl AsRef<Path>,
        options: &SaveOptions,
    ) -> Result<()> {
        let path = path.as_ref();
        let text = self.render_class(name)?;
        write_text(path, &text, options)?;
        debug!(class = name, path = %path.display(), mode = ?options.mode, "saved class");
        Ok(())
    }

    /// Save every class, in name order, as consecutive blocks.
    ///
    /// The file matches what one [`save_class`](Self::save_class) call per
    /// class in append mode would produce. An empty store writes nothing but
    /// still creates (or truncates) the file.
    pub fn save_all(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let blocks = self
            .classes()
            .map(|name| self.render_class(name))
            .collect::<Result<Vec<_>>>()?;

        if blocks.is_empty() {
            open_target(path, options)?;
        } else {
            write_text(path, &blocks.join("\n"), options)?;
        }
        debug!(classes = blocks.len(), path = %path.display(), "saved store");
        Ok(())
    }

    /// Replace the store's contents with every block in the file at `path`.
    ///
    /// The whole store is replaced, not merged. If the file cannot be read
    /// the store is left unchanged. Lines that are not valid UTF-8 are
    /// skipped like any other malformed line.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = decode_lines(&fs::read(path)?);
        *self = Self::parse(&text);
        debug!(classes = self.len(), path = %path.display(), "loaded store");
        Ok(())
    }

    /// Build a store from block text.
    ///
    /// Repeated keys keep the last value read. Entries whose value text does
    /// not decode are skipped, like any other malformed line.
    pub fn parse(text: &str) -> Self {
        let mut classes: BTreeMap<String, ClassMap<T>> = BTreeMap::new();
        for record in parse_document(text) {
            match T::decode(record.value) {
                Ok(value) => {
                    classes
                        .entry(record.class.to_string())
                        .or_default()
                        .insert(record.key.to_string(), value);
                }
                Err(e) => {
                    warn!(class = record.class, key = record.key, error = %e, "skipping undecodable value");
                }
            }
        }

        let mut store = Self::new();
        store.replace_all(classes);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn animals() -> ClassStore<i32> {
        let mut store = ClassStore::new();
        store.class("Animals").add("cat", 4).unwrap().add("dog", 3).unwrap();
        store
    }

    #[test]
    fn save_writes_block_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        animals().save_class("Animals", &path, &SaveOptions::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "(Animals)\n{\n\t\"cat\": 4,\n\t\"dog\": 3\n}\n");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let store = animals();
        store.save_class("Animals", &path, &SaveOptions::default()).unwrap();

        let mut loaded = ClassStore::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn append_accumulates_classes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        let mut store = animals();
        store.class("Birds").add("owl", 2).unwrap();
        store.save_class("Animals", &path, &SaveOptions::default()).unwrap();
        store.save_class("Birds", &path, &SaveOptions::default()).unwrap();

        let mut loaded = ClassStore::<i32>::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn truncate_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        let mut store = animals();
        store.class("Birds").add("owl", 2).unwrap();
        store.save_class("Animals", &path, &SaveOptions::default()).unwrap();
        store.save_class("Birds", &path, &SaveOptions::truncate()).unwrap();

        let mut loaded = ClassStore::<i32>::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.classes().collect::<Vec<_>>(), vec!["Birds"]);
    }

    #[test]
    fn save_only_writes_the_named_class() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        let mut store = animals();
        store.class("Birds").add("owl", 2).unwrap();
        store.class("Birds").save(&path, &SaveOptions::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("(Birds)"));
        assert!(!text.contains("Animals"));
    }

    #[test]
    fn save_all_matches_per_class_appends() {
        let dir = tempfile::tempdir().unwrap();
        let each = dir.path().join("each.txt");
        let all = dir.path().join("all.txt");

        let mut store = animals();
        store.class("Birds").add("owl", 2).unwrap();
        for class in ["Animals", "Birds"] {
            store.save_class(class, &each, &SaveOptions::default()).unwrap();
        }
        store.save_all(&all, &SaveOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&each).unwrap(),
            fs::read_to_string(&all).unwrap()
        );
    }

    #[test]
    fn save_all_empty_store_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        ClassStore::<i32>::new()
            .save_all(&path, &SaveOptions::default())
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn save_missing_class_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        let err = animals()
            .save_class("Plants", &path, &SaveOptions::default())
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!path.exists());
    }

    #[test]
    fn save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.txt");

        let err = animals()
            .save_class("Animals", &path, &SaveOptions::default())
            .unwrap_err();
        assert!(err.is_io());

        let options = SaveOptions {
            create_parent_dirs: true,
            ..SaveOptions::default()
        };
        animals().save_class("Animals", &path, &options).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn load_missing_file_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = animals();

        let err = store.load(dir.path().join("absent.txt")).unwrap_err();
        assert!(err.is_io());
        assert_eq!(store, animals());
    }

    #[test]
    fn load_replaces_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, "(Birds)\n{\n\t\"owl\": 2\n}\n").unwrap();

        let mut store = animals();
        store.load(&path).unwrap();
        assert!(!store.contains_class("Animals"));
        assert_eq!(store.get_first_by_class("Birds").unwrap(), ("owl".to_string(), 2));
    }

    #[test]
    fn load_merges_repeated_blocks_last_wins() {
        let text = "(A)\n{\n\t\"x\": 1,\n\t\"y\": 2\n}\n(A)\n{\n\t\"x\": 5\n}\n";
        let store = ClassStore::<i32>::parse(text);
        assert_eq!(store.class_len("A"), Some(2));
        assert_eq!(store.get_first_by_class("A").unwrap(), ("x".to_string(), 5));
    }

    #[test]
    fn load_sorts_on_next_render() {
        let store = ClassStore::<i32>::parse("(A)\n{\n\t\"z\": 1,\n\t\"a\": 2\n}\n");
        assert_eq!(store.render_class("A").unwrap(), "(A)\n{\n\t\"a\": 2,\n\t\"z\": 1\n}");
    }

    #[test]
    fn load_skips_malformed_and_undecodable_lines() {
        let text = "garbage\n(A)\n{\n\t\"ok\": 1,\n\t\"bad\": one,\n\tnot an entry\n}\n";
        let store = ClassStore::<i32>::parse(text);
        assert_eq!(store.get_all_by_class("A").unwrap().len(), 1);
    }

    #[test]
    fn load_skips_lines_that_are_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"(A)\n{\n\t\"k\": 1\n}\ncomment \xff\xfe\n(B)\n\t\"\xc3\": 2\n\t\"j\": 3\n").unwrap();

        let mut store = ClassStore::<i32>::new();
        store.load(&path).unwrap();
        assert_eq!(store.get_first_by_class("A").unwrap(), ("k".to_string(), 1));
        assert_eq!(store.get_all_by_class("B").unwrap().len(), 1);
        assert_eq!(store.get_first_by_class("B").unwrap(), ("j".to_string(), 3));
    }

    #[test]
    fn decode_lines_drops_only_damaged_lines() {
        assert_eq!(decode_lines(b"a\n\xffb\nc"), "a\nc\n");
        assert_eq!(decode_lines(b""), "\n");
    }

    #[test]
    fn empty_class_name_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");

        let mut store = ClassStore::new();
        store.writer().add("k", 7).unwrap();
        store.save_class("", &path, &SaveOptions::default()).unwrap();

        let mut loaded = ClassStore::<i32>::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.get_first_by_class("").unwrap(), ("k".to_string(), 7));
    }

    #[test]
    fn punctuated_class_and_key_roundtrip() {
        let mut store = ClassStore::new();
        store
            .class("odd (class): name")
            .add("a: b (c)", "x, y: z".to_string())
            .unwrap();
        let text = store.render_class("odd (class): name").unwrap();
        assert_eq!(ClassStore::<String>::parse(&text), store);
    }

    proptest! {
        #[test]
        fn saved_class_reloads_equal(
            entries in proptest::collection::btree_map("[a-zA-Z0-9 _.-]{0,12}", any::<i64>(), 1..16),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("data.txt");

            let mut store = ClassStore::new();
            store.class("C").add_pairs(entries.clone()).unwrap();
            store.save_class("C", &path, &SaveOptions::default()).unwrap();

            let mut loaded = ClassStore::<i64>::new();
            loaded.load(&path).unwrap();
            prop_assert_eq!(loaded.get_all_by_class("C").unwrap(), entries);
        }
    }
}
