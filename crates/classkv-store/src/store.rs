//! The class-partitioned store and its read accessors.
//!
//! A [`ClassStore`] maps class names to sorted key/value maps. Classes are
//! created lazily by the first insertion through a
//! [`ClassWriter`](crate::writer::ClassWriter), so a class that exists always
//! held at least one entry.

use std::collections::BTreeMap;

use classkv_format::{render_block, TextValue};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::writer::ClassWriter;

/// Sorted key/value contents of one class.
pub type ClassMap<T> = BTreeMap<String, T>;

/// A store of named classes, each holding its own sorted key/value map.
///
/// Keys are unique within a class and kept in ascending order. Inserting an
/// existing key overwrites its value.
///
/// # Examples
///
/// ```
/// use classkv_store::ClassStore;
///
/// let mut store = ClassStore::new();
/// store.class("Animals").add("dog", 3)?.add("cat", 4)?;
///
/// assert_eq!(store.get_first_by_class("Animals")?, ("cat".to_string(), 4));
/// assert_eq!(store.get_by_index_and_class("Animals", 1)?, ("dog".to_string(), 3));
/// # Ok::<(), classkv_store::StoreError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassStore<T> {
    classes: BTreeMap<String, ClassMap<T>>,
}

impl<T> ClassStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Start writing into the named class.
    ///
    /// No validation happens here; any name, including the empty string, is
    /// a distinct class. The class itself is created on first insertion.
    pub fn class(&mut self, name: impl Into<String>) -> ClassWriter<'_, T> {
        ClassWriter::new(self, name.into())
    }

    /// Start writing into the unnamed (empty-string) class.
    pub fn writer(&mut self) -> ClassWriter<'_, T> {
        self.class(String::new())
    }

    /// Insert or overwrite a single entry. Callers validate first.
    pub(crate) fn insert(&mut self, class: &str, key: String, value: T) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .insert(key, value);
    }

    pub(crate) fn replace_all(&mut self, classes: BTreeMap<String, ClassMap<T>>) {
        self.classes = classes;
    }

    fn class_map(&self, name: &str) -> Result<&ClassMap<T>> {
        self.classes
            .get(name)
            .ok_or_else(|| StoreError::not_found(name))
    }

    /// Names of all classes, in ascending order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Returns true if the class has been populated.
    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of entries in a class, or `None` if the class is absent.
    pub fn class_len(&self, name: &str) -> Option<usize> {
        self.classes.get(name).map(BTreeMap::len)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the store holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Remove every class.
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}

impl<T: Clone> ClassStore<T> {
    /// A copy of every entry in the class, in key order.
    pub fn get_all_by_class(&self, name: &str) -> Result<ClassMap<T>> {
        self.class_map(name).cloned()
    }

    /// The entry with the smallest key.
    pub fn get_first_by_class(&self, name: &str) -> Result<(String, T)> {
        self.class_map(name)?
            .first_key_value()
            .map(|(k, v)| (k.clone(), v.clone()))
            .ok_or_else(|| StoreError::not_found(name))
    }

    /// The entry with the largest key.
    pub fn get_last_by_class(&self, name: &str) -> Result<(String, T)> {
        self.class_map(name)?
            .last_key_value()
            .map(|(k, v)| (k.clone(), v.clone()))
            .ok_or_else(|| StoreError::not_found(name))
    }

    /// The entry at zero-based position `index` in key order.
    ///
    /// A missing class is reported as out of range, with length 0.
    pub fn get_by_index_and_class(&self, name: &str, index: usize) -> Result<(String, T)> {
        let map = self.classes.get(name);
        let len = map.map_or(0, BTreeMap::len);
        map.and_then(|map| map.iter().nth(index))
            .map(|(k, v)| (k.clone(), v.clone()))
            .ok_or_else(|| StoreError::IndexOutOfRange {
                class: name.to_string(),
                index,
                len,
            })
    }
}

impl<T: TextValue> ClassStore<T> {
    /// Render one class as a text block.
    ///
    /// Fails with [`StoreError::NotFound`] if the class was never populated.
    pub fn render_class(&self, name: &str) -> Result<String> {
        Ok(render_block(name, self.class_map(name)?)?)
    }
}

impl<T> Default for ClassStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
