//! Exporter: writes an FSON tree back out as directories and files.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fs::{FsSink, LocalFs};
use crate::tree::naming::marker_collides;
use crate::tree::{FsonTree, FsonValue, NodeId};

/// Writes trees through an [`FsSink`].
///
/// A failure stops the export where it happened; entries created before it
/// are left in place.
pub struct Exporter<'a, W: FsSink> {
    sink: &'a mut W,
}

impl<'a, W: FsSink> Exporter<'a, W> {
    pub fn new(sink: &'a mut W) -> Self {
        Self { sink }
    }

    /// Export the whole tree under `base`. Returns the path of the root entry.
    pub fn export(&mut self, tree: &FsonTree, base: &Path) -> Result<PathBuf> {
        self.export_node(tree, tree.root(), base)
    }

    /// Export the subtree rooted at `id` under `base`.
    ///
    /// The subtree root is named as it would be inside its parent, so an
    /// exported array element lands at `base/<index>`.
    pub fn export_node(&mut self, tree: &FsonTree, id: NodeId, base: &Path) -> Result<PathBuf> {
        let path = base.join(tree.segment_of(id)?);
        self.write_node(tree, id, &path)?;

        info!(path = %path.display(), "export complete");
        Ok(path)
    }

    fn write_node(&mut self, tree: &FsonTree, id: NodeId, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "exporting node");

        let node = tree.node(id)?;
        let segment = path.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
        if marker_collides(&segment, node.kind()) {
            warn!(
                path = %path.display(),
                "object name ends with the array marker; it will import as an array"
            );
        }

        match &node.value {
            FsonValue::File(value) => {
                self.sink.create_file(path)?;
                self.sink.write_all(path, value)?;
            }
            FsonValue::Object | FsonValue::Array => {
                self.sink.create_dir(path)?;
                for child in tree.children(id)? {
                    let child_path = path.join(tree.segment_of(child)?);
                    self.write_node(tree, child, &child_path)?;
                }
            }
        }

        Ok(())
    }
}

/// Export a tree to the local filesystem under `base`.
pub fn export_dir(tree: &FsonTree, base: impl AsRef<Path>) -> Result<PathBuf> {
    let mut fs = LocalFs::new();
    Exporter::new(&mut fs).export(tree, base.as_ref())
}
