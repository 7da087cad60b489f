use std::path::PathBuf;

use indextree::{Arena, NodeId};
use serde::Serialize;
use tracing::trace;

use super::naming;
use crate::error::{FsonError, Result};

/// The closed set of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FsonKind {
    File,
    Object,
    Array,
}

/// Kind plus payload. Only files carry a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsonValue {
    File(String),
    Object,
    Array,
}

impl FsonValue {
    /// Build the payload for `kind`; `value` is dropped unless it is a file.
    pub fn new(kind: FsonKind, value: &str) -> Self {
        match kind {
            FsonKind::File => FsonValue::File(value.to_string()),
            FsonKind::Object => FsonValue::Object,
            FsonKind::Array => FsonValue::Array,
        }
    }

    pub fn kind(&self) -> FsonKind {
        match self {
            FsonValue::File(_) => FsonKind::File,
            FsonValue::Object => FsonKind::Object,
            FsonValue::Array => FsonKind::Array,
        }
    }
}

/// One FSON value in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsonNode {
    /// Key under an object parent
    pub name: String,
    /// Position under an array parent
    pub index: usize,
    pub value: FsonValue,
}

impl FsonNode {
    pub fn named(name: impl Into<String>, kind: FsonKind, value: &str) -> Self {
        Self {
            name: name.into(),
            index: 0,
            value: FsonValue::new(kind, value),
        }
    }

    pub fn indexed(index: usize, kind: FsonKind, value: &str) -> Self {
        Self {
            name: String::new(),
            index,
            value: FsonValue::new(kind, value),
        }
    }

    pub fn kind(&self) -> FsonKind {
        self.value.kind()
    }

    /// File contents, or the empty string for objects and arrays
    pub fn value(&self) -> &str {
        match &self.value {
            FsonValue::File(value) => value,
            FsonValue::Object | FsonValue::Array => "",
        }
    }
}

/// FSON tree using arena allocation.
///
/// The arena owns every node; the parent link of a node is the arena's parent
/// id and never keeps anything alive.
#[derive(Debug, Clone)]
pub struct FsonTree {
    arena: Arena<FsonNode>,
    root: NodeId,
}

impl FsonTree {
    /// Create a tree with a single root node
    pub fn new(name: impl Into<String>, kind: FsonKind) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(FsonNode::named(name, kind, ""));
        Self { arena, root }
    }

    pub fn new_object(name: impl Into<String>) -> Self {
        Self::new(name, FsonKind::Object)
    }

    pub fn new_array(name: impl Into<String>) -> Self {
        Self::new(name, FsonKind::Array)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node.
    ///
    /// Ids are arena indices: one past the end of this arena fails with
    /// `UnknownNode`, but an id taken from another tree may still resolve.
    pub fn node(&self, id: NodeId) -> Result<&FsonNode> {
        self.arena
            .get(id)
            .map(|n| n.get())
            .ok_or(FsonError::UnknownNode)
    }

    pub fn kind(&self, id: NodeId) -> Result<FsonKind> {
        Ok(self.node(id)?.kind())
    }

    /// Get children of a node, in creation order
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.node(id)?;
        Ok(id.children(&self.arena).collect())
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize> {
        self.node(id)?;
        Ok(id.children(&self.arena).count())
    }

    /// Get parent of a node; the root has none
    pub fn parent(&self, id: NodeId) -> Result<NodeId> {
        self.arena
            .get(id)
            .ok_or(FsonError::UnknownNode)?
            .parent()
            .ok_or(FsonError::NoParent)
    }

    /// Count total nodes in tree
    pub fn node_count(&self) -> usize {
        self.arena.count()
    }

    /// Append a child addressed by `name` to an object node.
    pub fn new_named_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: FsonKind,
        value: &str,
    ) -> Result<NodeId> {
        if self.kind(parent)? != FsonKind::Object {
            return Err(FsonError::NotAnObject);
        }

        let node = FsonNode::named(name, kind, value);
        trace!(name = %node.name, ?kind, "new named child");
        Ok(self.add_child(parent, node))
    }

    /// Append a child to an array node. Its index is the current child count.
    pub fn new_indexed_child(
        &mut self,
        parent: NodeId,
        kind: FsonKind,
        value: &str,
    ) -> Result<NodeId> {
        if self.kind(parent)? != FsonKind::Array {
            return Err(FsonError::NotAnArray);
        }

        let index = self.child_count(parent)?;
        trace!(index, ?kind, "new indexed child");
        Ok(self.add_child(parent, FsonNode::indexed(index, kind, value)))
    }

    /// Append under `parent` by name or by index, whichever its kind calls
    /// for. `name` is unused under an array.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: FsonKind,
        value: &str,
    ) -> Result<NodeId> {
        match self.kind(parent)? {
            FsonKind::Object => self.new_named_child(parent, name, kind, value),
            FsonKind::Array => self.new_indexed_child(parent, kind, value),
            FsonKind::File => Err(FsonError::CannotAccessFileChildren),
        }
    }

    fn add_child(&mut self, parent: NodeId, node: FsonNode) -> NodeId {
        let child = self.arena.new_node(node);
        parent.append(child, &mut self.arena);
        child
    }

    /// First child of an object whose name matches, if any.
    pub fn get_named_child(&self, id: NodeId, name: &str) -> Result<Option<NodeId>> {
        if self.kind(id)? != FsonKind::Object {
            return Err(FsonError::NotAnObject);
        }

        Ok(id
            .children(&self.arena)
            .find(|&child| self.arena[child].get().name == name))
    }

    pub fn get_indexed_child(&self, id: NodeId, index: usize) -> Result<NodeId> {
        if self.kind(id)? != FsonKind::Array {
            return Err(FsonError::NotAnArray);
        }

        let len = self.child_count(id)?;
        id.children(&self.arena)
            .nth(index)
            .ok_or(FsonError::IndexOutOfBounds { index, len })
    }

    /// Resolve `segments` starting at the root.
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Result<Option<NodeId>> {
        self.get_from(self.root, segments)
    }

    /// Resolve `segments` starting at `start`.
    ///
    /// Objects are descended by name and arrays by decimal index. A missing
    /// object key yields `Ok(None)`; every other failure is an error.
    pub fn get_from<S: AsRef<str>>(&self, start: NodeId, segments: &[S]) -> Result<Option<NodeId>> {
        let mut current = start;
        self.node(current)?;

        for segment in segments {
            let segment = segment.as_ref();

            current = match self.kind(current)? {
                FsonKind::Object => match self.get_named_child(current, segment)? {
                    Some(child) => child,
                    None => return Ok(None),
                },
                FsonKind::Array => {
                    let index = segment
                        .parse::<usize>()
                        .map_err(|_| FsonError::InvalidIndex {
                            segment: segment.to_string(),
                        })?;
                    self.get_indexed_child(current, index)?
                }
                FsonKind::File => return Err(FsonError::CannotAccessFileChildren),
            };
        }

        Ok(Some(current))
    }

    /// On-disk name of a single node.
    ///
    /// The root uses its own name, marked if it is an array. Other nodes use
    /// their index under an array or their name under an object, with the
    /// array marker appended when the node itself is an array.
    pub fn segment_of(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;

        let parent = match self.parent(id) {
            Ok(parent) => parent,
            Err(FsonError::NoParent) => return Ok(naming::root_segment(&node.name, node.kind())),
            Err(e) => return Err(e),
        };

        let key = match self.kind(parent)? {
            FsonKind::Array => node.index.to_string(),
            FsonKind::Object | FsonKind::File => node.name.clone(),
        };
        Ok(naming::segment(&key, node.kind()))
    }

    /// Relative on-disk path of a node, rebuilt from its parent links.
    pub fn path_of(&self, id: NodeId) -> Result<PathBuf> {
        let mut segments = vec![self.segment_of(id)?];
        let mut current = id;

        loop {
            match self.parent(current) {
                Ok(parent) => {
                    segments.push(self.segment_of(parent)?);
                    current = parent;
                }
                Err(FsonError::NoParent) => break,
                Err(e) => return Err(e),
            }
        }

        Ok(segments.iter().rev().collect())
    }
}
