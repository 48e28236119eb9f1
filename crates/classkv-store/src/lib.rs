//! Class-partitioned key-value store with text file persistence.
//!
//! A [`ClassStore`] groups named values under named classes. Each class is
//! an independent map whose keys stay in ascending order. Classes are saved
//! as text blocks in the `classkv-format` layout and loaded back from them.
//!
//! # Example
//!
//! ```no_run
//! use classkv_store::{ClassStore, SaveOptions};
//!
//! let mut store = ClassStore::new();
//! store.class("Animals").add("cat", 4)?.add("dog", 3)?;
//! store.class("Birds").add("owl", 2)?;
//!
//! // Each save writes one class; append mode stacks them in one file.
//! store.save_class("Animals", "zoo.txt", &SaveOptions::default())?;
//! store.save_class("Birds", "zoo.txt", &SaveOptions::default())?;
//!
//! let mut loaded = ClassStore::<i32>::new();
//! loaded.load("zoo.txt")?;
//! assert_eq!(loaded, store);
//! # Ok::<(), classkv_store::StoreError>(())
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types for store operations
//! - [`store`]: [`ClassStore`] and its queries
//! - [`writer`]: [`ClassWriter`], the explicit insertion target
//! - [`persist`]: Save/load and [`SaveOptions`]
//! - [`viewer`]: Opening saved files in the default viewer

pub mod error;
pub mod persist;
pub mod store;
pub mod viewer;
pub mod writer;

pub use classkv_format::{FormatError, TextValue};
pub use error::{Result, StoreError};
pub use persist::{SaveMode, SaveOptions};
pub use store::{ClassMap, ClassStore};
pub use viewer::{open_file, save_and_view, SystemViewer, Viewer};
pub use writer::ClassWriter;
