//! Folder-type rule: the only on-disk format marker.
//!
//! A directory whose base name ends with [`ARRAY_MARKER`] holds an array; any
//! other directory holds an object. The marker is never part of a node's
//! stored name: the importer strips it and the exporter derives it from the
//! node kind.

use std::cmp::Ordering;

use super::FsonKind;

/// Suffix that marks a directory as an array
pub const ARRAY_MARKER: char = '_';

/// Kind of the node a directory with this base name maps to.
pub fn folder_kind(dir_name: &str) -> FsonKind {
    if dir_name.ends_with(ARRAY_MARKER) {
        FsonKind::Array
    } else {
        FsonKind::Object
    }
}

/// Base name with the array marker removed, if present.
pub fn strip_marker(dir_name: &str) -> &str {
    dir_name.strip_suffix(ARRAY_MARKER).unwrap_or(dir_name)
}

/// On-disk segment for a non-root node, given its key under the parent.
pub fn segment(key: &str, kind: FsonKind) -> String {
    match kind {
        FsonKind::Array => format!("{}{}", key, ARRAY_MARKER),
        FsonKind::Object | FsonKind::File => key.to_string(),
    }
}

/// On-disk name of a tree root.
///
/// An array root gains the marker unless its name already carries it, so a
/// root named `list_` read from disk is written back unchanged.
pub fn root_segment(name: &str, kind: FsonKind) -> String {
    match kind {
        FsonKind::Array if !name.ends_with(ARRAY_MARKER) => segment(name, kind),
        _ => name.to_string(),
    }
}

/// Whether a directory written under `segment` would be read back as an array
/// although the node is an object.
pub fn marker_collides(segment: &str, kind: FsonKind) -> bool {
    kind == FsonKind::Object && segment.ends_with(ARRAY_MARKER)
}

/// Listing order for sibling entries.
///
/// Names that are decimal indices (marker ignored) sort numerically so that
/// `10` follows `9`, and come before all other names, which sort by name.
pub fn compare_entries(a: &str, b: &str) -> Ordering {
    let index_a = strip_marker(a).parse::<usize>();
    let index_b = strip_marker(b).parse::<usize>();

    match (index_a, index_b) {
        (Ok(ia), Ok(ib)) => ia.cmp(&ib).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_kind() {
        assert_eq!(folder_kind("vidhan_"), FsonKind::Array);
        assert_eq!(folder_kind("sample"), FsonKind::Object);
        assert_eq!(folder_kind("_private"), FsonKind::Object);
        assert_eq!(folder_kind("_"), FsonKind::Array);
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("vidhan_"), "vidhan");
        assert_eq!(strip_marker("sample"), "sample");
        // Only one marker is stripped
        assert_eq!(strip_marker("a__"), "a_");
    }

    #[test]
    fn test_segment() {
        assert_eq!(segment("vidhan", FsonKind::Array), "vidhan_");
        assert_eq!(segment("sample", FsonKind::Object), "sample");
        assert_eq!(segment("0", FsonKind::File), "0");
        assert_eq!(segment("2", FsonKind::Array), "2_");
    }

    #[test]
    fn test_root_segment() {
        assert_eq!(root_segment("list", FsonKind::Array), "list_");
        assert_eq!(root_segment("list_", FsonKind::Array), "list_");
        assert_eq!(root_segment("sample", FsonKind::Object), "sample");
    }

    #[test]
    fn test_marker_collides() {
        assert!(marker_collides("x_", FsonKind::Object));
        assert!(!marker_collides("x_", FsonKind::Array));
        assert!(!marker_collides("x_", FsonKind::File));
        assert!(!marker_collides("x", FsonKind::Object));
    }

    #[test]
    fn test_compare_entries_numeric() {
        let mut names = vec!["10", "2", "1_", "0"];
        names.sort_by(|a, b| compare_entries(a, b));
        assert_eq!(names, vec!["0", "1_", "2", "10"]);
    }

    #[test]
    fn test_compare_entries_mixed() {
        let mut names = vec!["b", "10", "1x", "a", "9"];
        names.sort_by(|a, b| compare_entries(a, b));
        assert_eq!(names, vec!["9", "10", "1x", "a", "b"]);
    }
}
