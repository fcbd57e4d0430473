//! Owned hierarchy tree with lazy, at-most-once expansion fetches.

use crate::api::backend::{EntryType, ListingBackend};
use crate::error::Error;
use crate::tree::node::{NodeId, NodeKey, NodeState, TreeNode};
use std::fmt;
use std::sync::Arc;

/// The hub/project/folder/item tree, exclusively owning every node for
/// the duration of one browsing session.
///
/// Nodes are created lazily, one level per expansion, and never removed
/// or re-fetched once loaded. All mutation goes through the command
/// methods here; expansion of a node mutates only its own subtree.
pub struct HubTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    backend: Arc<dyn ListingBackend>,
}

impl fmt::Debug for HubTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubTree")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots)
            .field("backend", &"<dyn ListingBackend>")
            .finish()
    }
}

impl HubTree {
    /// Fetch the hub listing once and create one expandable root node per
    /// hub. Propagates the fetch error; no retry.
    pub async fn init(backend: Arc<dyn ListingBackend>) -> Result<Self, Error> {
        let hubs = backend.list_hubs().await?;
        tracing::debug!("initialized hub tree with {} hubs", hubs.len());

        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            backend,
        };
        for hub in hubs {
            let key = NodeKey::Hub { hub_id: hub.id };
            let id = tree.push_node(key, hub.name, None);
            tree.roots.push(id);
        }
        Ok(tree)
    }

    fn push_node(&mut self, key: NodeKey, label: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(id, key, label, parent));
        id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TreeNode, Error> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownNode(id))
    }

    /// Top-level hub nodes, in server order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Loaded children of a node; empty while unloaded.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get_node(id)
            .and_then(|n| n.children.as_deref())
            .unwrap_or(&[])
    }

    /// Expand a node, fetching its children on the first call only.
    ///
    /// State handling closes the duplicate-trigger window: the node is
    /// marked `Loading` synchronously before the await point, a second
    /// expand of the same node while the fetch is in flight is a no-op,
    /// and an already-loaded node just becomes visible again without a
    /// fetch. A failed fetch marks the node `Error` and leaves its
    /// children unloaded so the next expand retries.
    pub async fn expand_node(&mut self, id: NodeId) -> Result<&[NodeId], Error> {
        let (key, state, loaded) = {
            let node = self.get_node(id).ok_or(Error::UnknownNode(id))?;
            (node.key.clone(), node.state, node.is_loaded())
        };

        if state == NodeState::Loading {
            return Ok(&[]);
        }

        if loaded {
            self.node_mut(id)?.state = NodeState::Expanded;
            return Ok(self.children_of(id));
        }

        if !key.kind().expandable() {
            // Defensive default; item nodes never receive expand events.
            return Ok(&[]);
        }

        self.node_mut(id)?.state = NodeState::Loading;

        let children = match self.fetch_children(&key).await {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!("expansion of {} failed: {}", key, e);
                self.node_mut(id)?.state = NodeState::Error;
                return Err(e);
            }
        };

        tracing::debug!("expanded {} into {} children", key, children.len());
        let mut child_ids = Vec::with_capacity(children.len());
        for (child_key, label) in children {
            let child_id = self.push_node(child_key, label, Some(id));
            child_ids.push(child_id);
        }
        let node = self.node_mut(id)?;
        node.children = Some(child_ids);
        node.state = NodeState::Expanded;
        Ok(self.children_of(id))
    }

    /// Hide a node's children. Loaded children are kept; collapsing never
    /// discards or refetches anything.
    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), Error> {
        let node = self.node_mut(id)?;
        if node.state == NodeState::Expanded {
            node.state = NodeState::Collapsed;
        }
        Ok(())
    }

    pub async fn toggle_node(&mut self, id: NodeId) -> Result<(), Error> {
        let expanded = self
            .get_node(id)
            .ok_or(Error::UnknownNode(id))?
            .is_expanded();
        if expanded {
            self.collapse_node(id)
        } else {
            self.expand_node(id).await.map(|_| ())
        }
    }

    /// Fetch the child listing for a key and build `(key, label)` pairs,
    /// dispatching on the node kind. Server order is preserved; nothing
    /// is re-sorted locally.
    async fn fetch_children(&self, key: &NodeKey) -> Result<Vec<(NodeKey, String)>, Error> {
        match key {
            NodeKey::Hub { hub_id } => {
                let projects = self.backend.list_projects(hub_id).await?;
                Ok(projects
                    .into_iter()
                    .map(|p| {
                        (
                            NodeKey::Project {
                                hub_id: hub_id.clone(),
                                project_id: p.id,
                            },
                            p.name,
                        )
                    })
                    .collect())
            }
            NodeKey::Project { hub_id, project_id } => {
                let folders = self.backend.list_top_folders(hub_id, project_id).await?;
                Ok(folders
                    .into_iter()
                    .map(|f| {
                        (
                            NodeKey::Folder {
                                hub_id: hub_id.clone(),
                                project_id: project_id.clone(),
                                folder_id: f.id,
                            },
                            f.name,
                        )
                    })
                    .collect())
            }
            NodeKey::Folder {
                hub_id,
                project_id,
                folder_id,
            } => {
                let listing = self
                    .backend
                    .list_folder_contents(project_id, folder_id)
                    .await?;
                let items = listing.item_count();
                if items != listing.version_urns.len() {
                    return Err(Error::LocatorMismatch {
                        items,
                        urns: listing.version_urns.len(),
                    });
                }

                let mut urns = listing.version_urns.into_iter();
                let mut children = Vec::with_capacity(listing.entries.len());
                for entry in listing.entries {
                    match entry.entry_type {
                        EntryType::Folder => children.push((
                            NodeKey::Folder {
                                hub_id: hub_id.clone(),
                                project_id: project_id.clone(),
                                folder_id: entry.id,
                            },
                            entry.name,
                        )),
                        EntryType::Item => {
                            // Lengths validated above, the side table
                            // cannot run dry here.
                            let urn = urns.next().unwrap_or_default();
                            children.push((
                                NodeKey::Item {
                                    hub_id: hub_id.clone(),
                                    project_id: project_id.clone(),
                                    item_id: entry.id,
                                    urn,
                                },
                                entry.name,
                            ));
                        }
                    }
                }
                Ok(children)
            }
            NodeKey::Item { .. } => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::{Entity, FolderEntry, FolderListing};
    use async_trait::async_trait;

    /// Minimal single-path backend: one hub, one project, one folder.
    struct SinglePathBackend;

    #[async_trait]
    impl ListingBackend for SinglePathBackend {
        async fn list_hubs(&self) -> Result<Vec<Entity>, Error> {
            Ok(vec![Entity::new("h1", "Hub A")])
        }

        async fn list_projects(&self, hub_id: &str) -> Result<Vec<Entity>, Error> {
            assert_eq!(hub_id, "h1");
            Ok(vec![Entity::new("p1", "Project One")])
        }

        async fn list_top_folders(
            &self,
            _hub_id: &str,
            _project_id: &str,
        ) -> Result<Vec<Entity>, Error> {
            Ok(vec![Entity::new("f1", "Project Files")])
        }

        async fn list_folder_contents(
            &self,
            _project_id: &str,
            _folder_id: &str,
        ) -> Result<FolderListing, Error> {
            Ok(FolderListing {
                entries: vec![FolderEntry::new("it1", "Tower.rvt", EntryType::Item)],
                version_urns: vec!["QUJD".to_string()],
            })
        }
    }

    #[tokio::test]
    async fn test_init_creates_one_root_per_hub() {
        let tree = HubTree::init(Arc::new(SinglePathBackend)).await.unwrap();
        assert_eq!(tree.roots().len(), 1);
        let root = tree.get_node(tree.roots()[0]).unwrap();
        assert_eq!(root.key.to_string(), "hub|h1");
        assert_eq!(root.label, "Hub A");
        assert!(root.is_expandable());
        assert!(!root.is_loaded());
    }

    #[tokio::test]
    async fn test_expand_walks_the_full_path() {
        let mut tree = HubTree::init(Arc::new(SinglePathBackend)).await.unwrap();
        let hub = tree.roots()[0];

        let project = tree.expand_node(hub).await.unwrap()[0];
        assert_eq!(
            tree.get_node(project).unwrap().key.to_string(),
            "prj|h1|p1"
        );

        let folder = tree.expand_node(project).await.unwrap()[0];
        assert_eq!(
            tree.get_node(folder).unwrap().key.to_string(),
            "fld|h1|p1|f1"
        );

        let item = tree.expand_node(folder).await.unwrap()[0];
        let item_node = tree.get_node(item).unwrap();
        assert_eq!(item_node.key.to_string(), "itm|h1|p1|it1|QUJD");
        assert!(!item_node.is_expandable());
        assert_eq!(item_node.parent, Some(folder));
    }

    #[tokio::test]
    async fn test_expand_item_is_a_noop() {
        let mut tree = HubTree::init(Arc::new(SinglePathBackend)).await.unwrap();
        let hub = tree.roots()[0];
        let project = tree.expand_node(hub).await.unwrap()[0];
        let folder = tree.expand_node(project).await.unwrap()[0];
        let item = tree.expand_node(folder).await.unwrap()[0];

        let children = tree.expand_node(item).await.unwrap();
        assert!(children.is_empty());
        assert!(!tree.get_node(item).unwrap().is_loaded());
    }

    #[tokio::test]
    async fn test_collapse_keeps_children_loaded() {
        let mut tree = HubTree::init(Arc::new(SinglePathBackend)).await.unwrap();
        let hub = tree.roots()[0];
        tree.expand_node(hub).await.unwrap();
        assert!(tree.get_node(hub).unwrap().is_expanded());

        tree.collapse_node(hub).unwrap();
        let node = tree.get_node(hub).unwrap();
        assert!(node.is_collapsed());
        assert!(node.is_loaded());
        assert_eq!(tree.children_of(hub).len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_node_is_an_error() {
        let mut tree = HubTree::init(Arc::new(SinglePathBackend)).await.unwrap();
        let bogus = NodeId(999);
        assert!(matches!(
            tree.expand_node(bogus).await,
            Err(Error::UnknownNode(id)) if id == bogus
        ));
    }
}
