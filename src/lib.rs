//! FSON: File-System-Object-Notation.
//!
//! A directory tree read as a JSON-like value. Directories are objects, or
//! arrays when their name ends with `_`; regular files are string leaves.
//!
//! ```rust,ignore
//! use fson::{import_dir, export_dir};
//!
//! let tree = import_dir("config")?;
//! let port = tree.get(&["server", "port"])?;
//! export_dir(&tree, "/tmp/copy")?;
//! ```

pub mod error;
pub mod export;
pub mod fs;
pub mod import;
pub mod tree;

pub use error::{FsonError, Result};
pub use export::{export_dir, from_json, to_json, write_json, Exporter};
pub use fs::{FsSink, FsSource, LocalFs, MemoryFs};
pub use import::{import_dir, ImportOptions, Importer, LeafValue};
pub use tree::{FsonKind, FsonNode, FsonTree, FsonValue, NodeId};
