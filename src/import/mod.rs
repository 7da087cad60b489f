//! Importer: builds an FSON tree from an existing directory.
//!
//! Directories become objects, or arrays when their name carries the array
//! marker. Files become leaves. Children of an array are appended by index in
//! listing order; children of an object are keyed by their (unmarked) name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{FsonError, Result};
use crate::fs::{FsSource, LocalFs, WalkOptions};
use crate::tree::naming::{folder_kind, strip_marker};
use crate::tree::{FsonKind, FsonTree, NodeId};

/// What a file leaf holds after import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeafValue {
    /// The file's full contents. Exporting writes them back unchanged.
    #[default]
    Content,
    /// The file's base name.
    FileName,
}

/// Configuration options for importing a directory.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// The directory that becomes the tree root
    pub root_path: PathBuf,
    /// Maximum depth to traverse (None for unlimited)
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links
    pub follow_links: bool,
    pub leaf_value: LeafValue,
}

impl ImportOptions {
    /// Create new import options with default values
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            max_depth: None,
            follow_links: false,
            leaf_value: LeafValue::default(),
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set follow links option
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set what file leaves hold
    pub fn with_leaf_value(mut self, leaf_value: LeafValue) -> Self {
        self.leaf_value = leaf_value;
        self
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_depth: self.max_depth,
            follow_links: self.follow_links,
        }
    }
}

/// Walks a directory through an [`FsSource`] and builds an [`FsonTree`].
pub struct Importer<'a, S: FsSource> {
    source: &'a S,
    options: ImportOptions,
}

impl<'a, S: FsSource> Importer<'a, S> {
    pub fn new(source: &'a S, options: ImportOptions) -> Self {
        Self { source, options }
    }

    /// Perform the walk and return the tree.
    ///
    /// The first error from the walk or a file read aborts the import.
    pub fn import(&self) -> Result<FsonTree> {
        let root_path = &self.options.root_path;
        let mut entries = self.source.walk(root_path, self.options.walk_options());

        let root_entry = match entries.next() {
            Some(entry) => entry?,
            None => {
                return Err(FsonError::NotAFolder {
                    path: root_path.clone(),
                })
            }
        };

        if !root_entry.is_dir {
            return Err(FsonError::NotAFolder {
                path: root_path.clone(),
            });
        }

        // The root keeps its raw name; the exporter writes it back verbatim.
        let mut tree = FsonTree::new(
            root_entry.base_name.clone(),
            folder_kind(&root_entry.base_name),
        );

        let mut path_to_node: HashMap<PathBuf, NodeId> = HashMap::new();
        path_to_node.insert(PathBuf::new(), tree.root());

        for entry in entries {
            let entry = entry?;
            if entry.is_symlink {
                warn!(path = %entry.relative_path.display(), "skipping symbolic link");
                continue;
            }

            let parent_path = entry.relative_path.parent().unwrap_or(Path::new(""));

            let parent_id = path_to_node
                .get(parent_path)
                .copied()
                .ok_or_else(|| FsonError::NotAFolder {
                    path: root_path.join(parent_path),
                })?;

            let (name, kind) = if entry.is_dir {
                (strip_marker(&entry.base_name), folder_kind(&entry.base_name))
            } else {
                (entry.base_name.as_str(), FsonKind::File)
            };

            let value = match (kind, self.options.leaf_value) {
                (FsonKind::File, LeafValue::Content) => self
                    .source
                    .read_to_string(&root_path.join(&entry.relative_path))?,
                (FsonKind::File, LeafValue::FileName) => entry.base_name.clone(),
                _ => String::new(),
            };

            debug!(path = %entry.relative_path.display(), ?kind, "importing entry");
            let node_id = tree.append_child(parent_id, name, kind, &value)?;

            if entry.is_dir {
                path_to_node.insert(entry.relative_path, node_id);
            }
        }

        info!(
            root = %root_path.display(),
            nodes = tree.node_count(),
            "import complete"
        );
        Ok(tree)
    }
}

/// Import a directory from the local filesystem with default options.
pub fn import_dir(path: impl Into<PathBuf>) -> Result<FsonTree> {
    Importer::new(&LocalFs::new(), ImportOptions::new(path)).import()
}
