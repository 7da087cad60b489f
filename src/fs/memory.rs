//! In-memory capability. Paths are plain keys; a path whose parent is empty
//! or `/` may always be created.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{FsSink, FsSource, WalkEntry, WalkOptions};
use crate::error::{FsonError, Result};
use crate::tree::naming::compare_entries;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Dir,
    File(String),
}

/// A filesystem that lives in a map
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: BTreeMap<PathBuf, Entry>,
}

fn io_error(path: &Path, kind: ErrorKind, message: &str) -> FsonError {
    FsonError::io(path, std::io::Error::new(kind, message.to_string()))
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.get(path), Some(Entry::Dir))
    }

    pub fn is_file(&self, path: &Path) -> bool {
        matches!(self.entries.get(path), Some(Entry::File(_)))
    }

    /// Contents of a file, if there is one at `path`
    pub fn contents(&self, path: &Path) -> Option<&str> {
        match self.entries.get(path) {
            Some(Entry::File(content)) => Some(content),
            _ => None,
        }
    }

    /// All stored paths in sorted order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.keys().cloned().collect()
    }

    fn check_new(&self, path: &Path) -> Result<()> {
        if self.entries.contains_key(path) {
            return Err(io_error(path, ErrorKind::AlreadyExists, "entry already exists"));
        }

        match path.parent() {
            None => Ok(()),
            Some(parent) if parent.as_os_str().is_empty() || parent == Path::new("/") => Ok(()),
            Some(parent) if self.is_dir(parent) => Ok(()),
            Some(_) => Err(io_error(path, ErrorKind::NotFound, "parent directory does not exist")),
        }
    }

    fn sorted_children(&self, dir: &Path) -> Vec<(&PathBuf, &Entry)> {
        let mut children: Vec<(&PathBuf, &Entry)> = self
            .entries
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .collect();

        children.sort_by(|(a, _), (b, _)| compare_entries(&base_name(a), &base_name(b)));
        children
    }

    fn collect_recursive(
        &self,
        root: &Path,
        path: &Path,
        depth: usize,
        options: WalkOptions,
        out: &mut Vec<WalkEntry>,
    ) {
        let is_dir = self.is_dir(path);
        out.push(WalkEntry {
            relative_path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            is_dir,
            is_symlink: false,
            base_name: base_name(path),
        });

        if !is_dir || options.max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        for (child, _) in self.sorted_children(path) {
            self.collect_recursive(root, child, depth + 1, options, out);
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

impl FsSource for MemoryFs {
    fn walk<'a>(
        &'a self,
        root: &Path,
        options: WalkOptions,
    ) -> Box<dyn Iterator<Item = Result<WalkEntry>> + 'a> {
        if !self.entries.contains_key(root) {
            let err = io_error(root, ErrorKind::NotFound, "path not found");
            return Box::new(std::iter::once(Err::<WalkEntry, _>(err)));
        }

        let mut entries = Vec::new();
        self.collect_recursive(root, root, 0, options, &mut entries);

        let entries: Vec<Result<WalkEntry>> = entries.into_iter().map(Ok).collect();
        Box::new(entries.into_iter())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.entries.get(path) {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Dir) => Err(io_error(path, ErrorKind::Other, "is a directory")),
            None => Err(io_error(path, ErrorKind::NotFound, "path not found")),
        }
    }
}

impl FsSink for MemoryFs {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        self.check_new(path)?;
        self.entries.insert(path.to_path_buf(), Entry::Dir);
        Ok(())
    }

    fn create_file(&mut self, path: &Path) -> Result<()> {
        self.check_new(path)?;
        self.entries.insert(path.to_path_buf(), Entry::File(String::new()));
        Ok(())
    }

    fn write_all(&mut self, path: &Path, content: &str) -> Result<()> {
        match self.entries.get_mut(path) {
            Some(Entry::File(existing)) => {
                *existing = content.to_string();
                Ok(())
            }
            Some(Entry::Dir) => Err(io_error(path, ErrorKind::Other, "is a directory")),
            None => Err(io_error(path, ErrorKind::NotFound, "file does not exist")),
        }
    }
}
