pub mod naming;
mod node;

pub use indextree::NodeId;
pub use node::{FsonKind, FsonNode, FsonTree, FsonValue};
