//! Writing trees out: as a directory layout, or as JSON.

mod dir;
mod json;

pub use dir::{export_dir, Exporter};
pub use json::{from_json, node_info, to_json, write_json, NodeInfo};
