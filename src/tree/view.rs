//! Presentation-facing state over the tree: selection, scrolling, and the
//! flattened visible-node list a renderer can draw directly. The view is
//! where a qualifying selection turns into a [`Selection`] callback.

use crate::error::Error;
use crate::selection::Selection;
use crate::tree::node::{NodeId, NodeKey};
use crate::tree::tree::HubTree;
use crate::urn;
use std::fmt;

pub type SelectionCallback = Box<dyn FnMut(Selection) + Send>;

pub struct HubTreeView {
    tree: HubTree,
    selection: Vec<NodeId>,
    scroll_offset: usize,
    on_selection: SelectionCallback,
}

impl fmt::Debug for HubTreeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubTreeView")
            .field("tree", &self.tree)
            .field("selection", &self.selection)
            .field("scroll_offset", &self.scroll_offset)
            .field("on_selection", &"<callback>")
            .finish()
    }
}

impl HubTreeView {
    pub fn new(tree: HubTree, on_selection: impl FnMut(Selection) + Send + 'static) -> Self {
        Self {
            tree,
            selection: Vec::new(),
            scroll_offset: 0,
            on_selection: Box::new(on_selection),
        }
    }

    pub fn tree(&self) -> &HubTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut HubTree {
        &mut self.tree
    }

    /// Expand a node through the view (convenience over `tree_mut`).
    pub async fn expand(&mut self, id: NodeId) -> Result<(), Error> {
        self.tree.expand_node(id).await.map(|_| ())
    }

    pub async fn toggle(&mut self, id: NodeId) -> Result<(), Error> {
        self.tree.toggle_node(id).await
    }

    /// Replace the selection set.
    ///
    /// When the new set is exactly one item node, its key is decoded and
    /// the callback fires exactly once. Empty, multiple, and non-item
    /// selections never fire it, and neither do keys whose urn fails to
    /// decode (stray events are ignored, not errors).
    pub fn set_selection(&mut self, selection: Vec<NodeId>) {
        self.selection = selection;

        let &[only] = self.selection.as_slice() else {
            return;
        };
        let Some(node) = self.tree.get_node(only) else {
            return;
        };
        if let Some(decoded) = decode_item_key(&node.key) {
            (self.on_selection)(decoded);
        }
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Flatten the tree depth-first into `(node, depth)` pairs, following
    /// only expanded nodes, in expansion order. This is the list a
    /// renderer draws top to bottom.
    pub fn visible_nodes(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .tree
            .roots()
            .iter()
            .rev()
            .map(|&id| (id, 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            let Some(node) = self.tree.get_node(id) else {
                continue;
            };
            if node.is_expanded() {
                for &child in self.tree.children_of(id).iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }
        out
    }

    /// Move a single selection down the visible list.
    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    /// Move a single selection up the visible list.
    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_nodes();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selection
            .first()
            .and_then(|sel| visible.iter().position(|(id, _)| id == sel));
        let next = match current {
            Some(idx) => {
                let idx = idx as isize + delta;
                idx.clamp(0, visible.len() as isize - 1) as usize
            }
            None => 0,
        };
        self.set_selection(vec![visible[next].0]);
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Keep the selected row inside a viewport of the given height.
    pub fn update_scroll_for_selection(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        let visible = self.visible_nodes();
        let Some(idx) = self
            .selection
            .first()
            .and_then(|sel| visible.iter().position(|(id, _)| id == sel))
        else {
            return;
        };
        if idx < self.scroll_offset {
            self.scroll_offset = idx;
        } else if idx >= self.scroll_offset + viewport_height {
            self.scroll_offset = idx + 1 - viewport_height;
        }
    }
}

/// Decode an item key into the emitted selection; `None` for non-item
/// keys and for urns that fail to decode.
fn decode_item_key(key: &NodeKey) -> Option<Selection> {
    let NodeKey::Item {
        hub_id,
        project_id,
        item_id,
        urn,
    } = key
    else {
        return None;
    };
    match urn::decode_version_id(urn) {
        Ok(version_id) => Some(Selection {
            hub_id: hub_id.clone(),
            project_id: project_id.clone(),
            item_id: item_id.clone(),
            version_id,
            urn: urn.clone(),
        }),
        Err(e) => {
            tracing::warn!("ignoring selection with undecodable urn {}: {}", urn, e);
            None
        }
    }
}
