//! Real-disk capability backed by walkdir and `std::fs`.

use std::fs::{self, OpenOptions};
use std::path::Path;

use walkdir::WalkDir;

use super::{FsSink, FsSource, WalkEntry, WalkOptions};
use crate::error::{FsonError, Result};
use crate::tree::naming::compare_entries;

/// Stateless handle on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FsSource for LocalFs {
    fn walk<'a>(
        &'a self,
        root: &Path,
        options: WalkOptions,
    ) -> Box<dyn Iterator<Item = Result<WalkEntry>> + 'a> {
        let mut walker = WalkDir::new(root)
            .follow_links(options.follow_links)
            .sort_by(|a, b| {
                compare_entries(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
            });

        if let Some(max_depth) = options.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let root = root.to_path_buf();
        Box::new(walker.into_iter().map(move |entry| -> Result<WalkEntry> {
            let entry = entry?;
            let relative_path = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();

            Ok(WalkEntry {
                relative_path,
                is_dir: entry.file_type().is_dir(),
                is_symlink: entry.file_type().is_symlink(),
                base_name: entry.file_name().to_string_lossy().to_string(),
            })
        }))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| FsonError::io(path, e))
    }
}

impl FsSink for LocalFs {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| FsonError::io(path, e))
    }

    fn create_file(&mut self, path: &Path) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| FsonError::io(path, e))
    }

    fn write_all(&mut self, path: &Path, content: &str) -> Result<()> {
        if !path.is_file() {
            return Err(FsonError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        fs::write(path, content).map_err(|e| FsonError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_walk_preorder_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("list_")).unwrap();
        for i in [10, 2, 0, 1, 3, 4, 5, 6, 7, 8, 9] {
            std::fs::write(root.join("list_").join(i.to_string()), "x").unwrap();
        }
        std::fs::write(root.join("b.txt"), "b").unwrap();

        let fs = LocalFs::new();
        let entries: Vec<WalkEntry> = fs
            .walk(root, WalkOptions::default())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(entries[0].relative_path, PathBuf::new());
        assert!(entries[0].is_dir);
        assert!(!entries[0].is_symlink);

        let names: Vec<&str> = entries[1..].iter().map(|e| e.base_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["b.txt", "list_", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
        );
        assert_eq!(entries[3].relative_path, PathBuf::from("list_/0"));
    }

    #[test]
    fn test_walk_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("a/b")).unwrap();

        let fs = LocalFs::new();
        let options = WalkOptions {
            max_depth: Some(1),
            follow_links: false,
        };
        let entries: Vec<WalkEntry> = fs.walk(root, options).collect::<Result<_>>().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_walk_missing_root() {
        let fs = LocalFs::new();
        let missing = Path::new("/nonexistent/path/that/does/not/exist");
        let mut walk = fs.walk(missing, WalkOptions::default());
        assert!(matches!(walk.next(), Some(Err(FsonError::Walk(_)))));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_unfollowed_links() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let fs = LocalFs::new();
        let entries: Vec<WalkEntry> = fs
            .walk(root, WalkOptions::default())
            .collect::<Result<_>>()
            .unwrap();
        let link = entries.iter().find(|e| e.base_name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_dir);

        let options = WalkOptions {
            max_depth: None,
            follow_links: true,
        };
        let entries: Vec<WalkEntry> = fs.walk(root, options).collect::<Result<_>>().unwrap();
        let link = entries.iter().find(|e| e.base_name == "link").unwrap();
        assert!(!link.is_symlink);
        assert!(link.is_dir);
    }

    #[test]
    fn test_sink_refuses_existing_paths() {
        let temp_dir = TempDir::new().unwrap();
        let mut fs = LocalFs::new();
        let dir = temp_dir.path().join("dir");
        let file = temp_dir.path().join("file");

        fs.create_dir(&dir).unwrap();
        assert!(matches!(fs.create_dir(&dir), Err(FsonError::Io { .. })));

        fs.create_file(&file).unwrap();
        assert!(matches!(fs.create_file(&file), Err(FsonError::Io { .. })));

        fs.write_all(&file, "hello").unwrap();
        assert_eq!(fs.read_to_string(&file).unwrap(), "hello");
    }

    #[test]
    fn test_write_all_requires_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut fs = LocalFs::new();
        let missing = temp_dir.path().join("missing");

        assert!(matches!(fs.write_all(&missing, "x"), Err(FsonError::Io { .. })));
        assert!(!missing.exists());
    }
}
