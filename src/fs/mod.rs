//! Filesystem capabilities consumed by the importer and exporter.
//!
//! The tree logic never touches `std::fs` directly: reading goes through
//! [`FsSource`] and writing through [`FsSink`]. [`LocalFs`] is the real disk,
//! [`MemoryFs`] keeps everything in memory.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// One entry produced by a directory walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walk root; empty for the root itself
    pub relative_path: PathBuf,
    pub is_dir: bool,
    /// A link that the walk did not follow
    pub is_symlink: bool,
    pub base_name: String,
}

/// Controls how far and through what a walk goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None for unlimited)
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links
    pub follow_links: bool,
}

/// Read side: walk a directory and read file contents.
pub trait FsSource {
    /// Walk `root` in pre-order.
    ///
    /// Directories come before their contents and siblings are ordered by
    /// [`crate::tree::naming::compare_entries`]. The first error ends the
    /// walk for the importer.
    fn walk<'a>(
        &'a self,
        root: &Path,
        options: WalkOptions,
    ) -> Box<dyn Iterator<Item = Result<WalkEntry>> + 'a>;

    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Write side: the three primitives the exporter needs.
pub trait FsSink {
    /// Create a directory. Fails if the path already exists.
    fn create_dir(&mut self, path: &Path) -> Result<()>;

    /// Create an empty file. Fails if the path already exists.
    fn create_file(&mut self, path: &Path) -> Result<()>;

    /// Replace the contents of an existing file.
    fn write_all(&mut self, path: &Path, content: &str) -> Result<()>;
}
