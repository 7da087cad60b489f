use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::error::{FsonError, Result};
use crate::tree::{FsonKind, FsonTree, FsonValue, NodeId};

/// Summary of a single node, for display
#[derive(Debug, Serialize)]
pub struct NodeInfo {
    pub path: String,
    pub name: String,
    pub index: usize,
    pub kind: FsonKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub children: usize,
}

pub fn node_info(tree: &FsonTree, id: NodeId) -> Result<NodeInfo> {
    let node = tree.node(id)?;
    let value = match &node.value {
        FsonValue::File(value) => Some(value.clone()),
        FsonValue::Object | FsonValue::Array => None,
    };

    Ok(NodeInfo {
        path: tree.path_of(id)?.to_string_lossy().to_string(),
        name: node.name.clone(),
        index: node.index,
        kind: node.kind(),
        value,
        children: tree.child_count(id)?,
    })
}

/// Recursively convert a subtree to a JSON value.
///
/// Objects become maps (the first child wins on a repeated name), arrays
/// become arrays and files become strings.
pub fn to_json(tree: &FsonTree, id: NodeId) -> Result<Value> {
    let node = tree.node(id)?;

    let value = match &node.value {
        FsonValue::File(value) => Value::String(value.clone()),
        FsonValue::Array => Value::Array(
            tree.children(id)?
                .into_iter()
                .map(|child_id| to_json(tree, child_id))
                .collect::<Result<_>>()?,
        ),
        FsonValue::Object => {
            let mut map = Map::new();
            for child_id in tree.children(id)? {
                let name = &tree.node(child_id)?.name;
                if !map.contains_key(name) {
                    map.insert(name.clone(), to_json(tree, child_id)?);
                }
            }
            Value::Object(map)
        }
    };

    Ok(value)
}

/// Build a tree from a JSON document.
///
/// The document must be an object or an array; it becomes the root named
/// `name`. Strings become files, `null` an empty file, and other scalars a
/// file holding their JSON text.
pub fn from_json(name: &str, value: &Value) -> Result<FsonTree> {
    let mut tree = match value {
        Value::Object(_) => FsonTree::new_object(name),
        Value::Array(_) => FsonTree::new_array(name),
        _ => return Err(FsonError::NotAFolder { path: name.into() }),
    };

    let root = tree.root();
    add_children(&mut tree, root, value)?;
    Ok(tree)
}

fn add_children(tree: &mut FsonTree, parent: NodeId, value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                add_value(tree, parent, key, child)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                add_value(tree, parent, "", item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn add_value(tree: &mut FsonTree, parent: NodeId, key: &str, value: &Value) -> Result<()> {
    match value {
        Value::Object(_) => {
            let id = tree.append_child(parent, key, FsonKind::Object, "")?;
            add_children(tree, id, value)?;
        }
        Value::Array(_) => {
            let id = tree.append_child(parent, key, FsonKind::Array, "")?;
            add_children(tree, id, value)?;
        }
        Value::String(s) => {
            tree.append_child(parent, key, FsonKind::File, s)?;
        }
        Value::Null => {
            tree.append_child(parent, key, FsonKind::File, "")?;
        }
        Value::Bool(_) | Value::Number(_) => {
            tree.append_child(parent, key, FsonKind::File, &value.to_string())?;
        }
    }
    Ok(())
}

/// Pretty-print a subtree as JSON
pub fn write_json(tree: &FsonTree, id: NodeId, writer: &mut impl Write) -> Result<()> {
    let value = to_json(tree, id)?;
    serde_json::to_writer_pretty(writer, &value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_tree() -> FsonTree {
        let mut tree = FsonTree::new_object("test");
        let root = tree.root();

        tree.new_named_child(root, "name", FsonKind::File, "fson").unwrap();
        let tags = tree.new_named_child(root, "tags", FsonKind::Array, "").unwrap();
        tree.new_indexed_child(tags, FsonKind::File, "fs").unwrap();
        tree.new_indexed_child(tags, FsonKind::File, "json").unwrap();
        tree.new_named_child(root, "meta", FsonKind::Object, "").unwrap();

        tree
    }

    #[test]
    fn test_to_json() {
        let tree = create_test_tree();
        let value = to_json(&tree, tree.root()).unwrap();

        assert_eq!(
            value,
            json!({"name": "fson", "tags": ["fs", "json"], "meta": {}})
        );
    }

    #[test]
    fn test_to_json_first_name_wins() {
        let mut tree = FsonTree::new_object("dup");
        let root = tree.root();
        tree.new_named_child(root, "k", FsonKind::File, "first").unwrap();
        tree.new_named_child(root, "k", FsonKind::File, "second").unwrap();

        assert_eq!(to_json(&tree, root).unwrap(), json!({"k": "first"}));
    }

    #[test]
    fn test_from_json() {
        let doc = json!({
            "title": "FSON",
            "count": 3,
            "ok": true,
            "missing": null,
            "rows": [["a", "b"], {"x": "y"}]
        });
        let tree = from_json("doc", &doc).unwrap();

        assert_eq!(tree.node(tree.root()).unwrap().name, "doc");

        let count = tree.get(&["count"]).unwrap().unwrap();
        assert_eq!(tree.node(count).unwrap().value(), "3");
        let ok = tree.get(&["ok"]).unwrap().unwrap();
        assert_eq!(tree.node(ok).unwrap().value(), "true");
        let missing = tree.get(&["missing"]).unwrap().unwrap();
        assert_eq!(tree.node(missing).unwrap().value(), "");

        let cell = tree.get(&["rows", "0", "1"]).unwrap().unwrap();
        assert_eq!(tree.node(cell).unwrap().value(), "b");
        let x = tree.get(&["rows", "1", "x"]).unwrap().unwrap();
        assert_eq!(tree.node(x).unwrap().value(), "y");
    }

    #[test]
    fn test_from_json_scalar_root() {
        let result = from_json("scalar", &json!("just a string"));
        assert!(matches!(result, Err(FsonError::NotAFolder { .. })));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = json!([{"a": ["1", "2"]}, "x", []]);
        let tree = from_json("list", &doc).unwrap();
        assert_eq!(to_json(&tree, tree.root()).unwrap(), doc);
    }

    #[test]
    fn test_write_json() {
        let tree = create_test_tree();
        let tags = tree.get(&["tags"]).unwrap().unwrap();

        let mut buffer = Vec::new();
        write_json(&tree, tags, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["fs", "json"]);
    }

    #[test]
    fn test_node_info() {
        let tree = create_test_tree();
        let tag = tree.get(&["tags", "1"]).unwrap().unwrap();

        let info = node_info(&tree, tag).unwrap();
        assert_eq!(info.path, "test/tags_/1");
        assert_eq!(info.index, 1);
        assert_eq!(info.kind, FsonKind::File);
        assert_eq!(info.value.as_deref(), Some("json"));

        let output = serde_json::to_string(&node_info(&tree, tree.root()).unwrap()).unwrap();
        assert!(output.contains("\"kind\":\"object\""));
        assert!(output.contains("\"children\":3"));
        assert!(!output.contains("\"value\""));
    }
}
