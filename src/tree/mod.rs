// Tree module for the lazily loaded hub hierarchy
//
// This module provides the owned tree over hubs, projects, folders, and
// items: nodes are created one level at a time as the user expands them,
// and a view layer carries selection and the flattened display list.

pub mod node;
pub mod tree;
pub mod view;

pub use node::{NodeId, NodeKey, NodeKind, NodeState, TreeNode};
pub use tree::HubTree;
pub use view::{HubTreeView, SelectionCallback};
