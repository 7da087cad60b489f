//! Error taxonomy shared by the tree model, importer and exporter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, navigating or persisting an FSON tree.
#[derive(Error, Debug)]
pub enum FsonError {
    /// A named operation was attempted on a node that is not an object
    #[error("not an object")]
    NotAnObject,

    /// An indexed operation was attempted on a node that is not an array
    #[error("not an array")]
    NotAnArray,

    /// A tree root was requested from something that is not a directory
    #[error("not a folder: {path}")]
    NotAFolder {
        /// The offending path
        path: PathBuf,
    },

    /// An array index past the last child
    #[error("index out of bounds: {index} (len {len})")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of children in the array
        len: usize,
    },

    /// A path segment under an array that is not a non-negative integer
    #[error("invalid index: {segment:?}")]
    InvalidIndex {
        /// The segment that failed to parse
        segment: String,
    },

    /// Navigation tried to descend below a file node
    #[error("cannot access file children")]
    CannotAccessFileChildren,

    /// The root node has no parent
    #[error("no parent")]
    NoParent,

    /// A node id that does not belong to this tree
    #[error("unknown node")]
    UnknownNode,

    /// An I/O error reported by a filesystem capability
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An error reported by the directory walk
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON could not be encoded or decoded
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FsonError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsonError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(FsonError::NotAnObject.to_string(), "not an object");
        assert_eq!(FsonError::NotAnArray.to_string(), "not an array");
        assert_eq!(
            FsonError::CannotAccessFileChildren.to_string(),
            "cannot access file children"
        );
        assert_eq!(FsonError::NoParent.to_string(), "no parent");

        let err = FsonError::NotAFolder {
            path: PathBuf::from("/file.txt"),
        };
        assert_eq!(err.to_string(), "not a folder: /file.txt");

        let err = FsonError::IndexOutOfBounds { index: 3, len: 2 };
        assert_eq!(err.to_string(), "index out of bounds: 3 (len 2)");

        let err = FsonError::InvalidIndex {
            segment: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid index: \"abc\"");
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "test error");
        let err = FsonError::io("/some/path", io_err);

        assert!(err.to_string().contains("/some/path"));
        assert!(err.to_string().contains("test error"));
    }
}
