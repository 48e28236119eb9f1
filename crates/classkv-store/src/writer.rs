//! [`ClassWriter`]: the explicit "current class" handle used for insertion.
//!
//! Rather than keeping a hidden current class on the store, every insertion
//! goes through a writer that names its target class. The writer keeps that
//! class until [`ClassWriter::set_class`] changes it.

use std::path::Path;

use classkv_format::{validate_key, TextValue};

use crate::error::Result;
use crate::persist::SaveOptions;
use crate::store::ClassStore;

/// A mutable handle on a [`ClassStore`] that targets one class at a time.
#[derive(Debug)]
pub struct ClassWriter<'a, T> {
    store: &'a mut ClassStore<T>,
    class: String,
}

impl<'a, T> ClassWriter<'a, T> {
    pub(crate) fn new(store: &'a mut ClassStore<T>, class: String) -> Self {
        Self { store, class }
    }

    /// The class that insertions currently target.
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Switch the target class for subsequent insertions.
    pub fn set_class(&mut self, name: impl Into<String>) -> &mut Self {
        self.class = name.into();
        self
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &ClassStore<T> {
        &*self.store
    }
}

impl<'a, T: TextValue> ClassWriter<'a, T> {
    /// Insert or overwrite `key` in the current class.
    ///
    /// The key and the value's text form are checked here, so anything that
    /// is stored can also be saved.
    pub fn add(&mut self, key: impl Into<String>, value: T) -> Result<&mut Self> {
        let key = key.into();
        validate_key(&key)?;
        value.encode()?;
        self.store.insert(&self.class, key, value);
        Ok(self)
    }

    /// Insert several pairs, left to right, as repeated [`add`](Self::add)
    /// calls would.
    ///
    /// Stops at the first rejected pair; pairs before it stay inserted.
    pub fn add_pairs<K, I>(&mut self, pairs: I) -> Result<&mut Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        for (key, value) in pairs {
            self.add(key, value)?;
        }
        Ok(self)
    }

    /// Render the current class as a text block.
    pub fn render(&self) -> Result<String> {
        self.store.render_class(&self.class)
    }

    /// Save the current class's block to `path`.
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        self.store.save_class(&self.class, path, options)
    }
}

/// Insert `key => value` pairs through a [`ClassWriter`].
///
/// ```
/// use classkv_store::{add_pairs, ClassStore};
///
/// let mut store = ClassStore::new();
/// add_pairs!(store.class("Animals"), "cat" => 4, "dog" => 3)?;
/// assert_eq!(store.class_len("Animals"), Some(2));
/// # Ok::<(), classkv_store::StoreError>(())
/// ```
#[macro_export]
macro_rules! add_pairs {
    ($writer:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $writer.add_pairs([$(($key, $value)),+])
    };
}
