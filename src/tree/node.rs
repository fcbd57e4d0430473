use std::fmt;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Kind of hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Hub,
    Project,
    Folder,
    Item,
}

impl NodeKind {
    /// Items are terminal; everything else expands lazily.
    pub fn expandable(self) -> bool {
        !matches!(self, NodeKind::Item)
    }

    /// Icon name a renderer can show for this kind of node.
    pub fn icon_hint(self) -> &'static str {
        match self {
            NodeKind::Hub => "cloud",
            NodeKind::Project => "building",
            NodeKind::Folder => "folder",
            NodeKind::Item => "file-earmark-richtext",
        }
    }
}

/// Typed composite identity of a node: its kind plus the ids of every
/// ancestor accumulated from the hub down, which makes keys unique by
/// construction. Items additionally carry the encoded version urn.
///
/// The pipe-delimited wire form (`hub|<id>`, `prj|<hub>|<project>`,
/// `fld|<hub>|<project>|<folder>`, `itm|<hub>|<project>|<item>|<urn>`)
/// is produced by `Display` and accepted by [`NodeKey::parse`]. Parsing
/// happens once at that boundary; everything downstream matches on the
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Hub {
        hub_id: String,
    },
    Project {
        hub_id: String,
        project_id: String,
    },
    Folder {
        hub_id: String,
        project_id: String,
        folder_id: String,
    },
    Item {
        hub_id: String,
        project_id: String,
        item_id: String,
        urn: String,
    },
}

impl NodeKey {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeKey::Hub { .. } => NodeKind::Hub,
            NodeKey::Project { .. } => NodeKind::Project,
            NodeKey::Folder { .. } => NodeKind::Folder,
            NodeKey::Item { .. } => NodeKind::Item,
        }
    }

    /// Parse the wire form. Returns `None` for anything that does not
    /// match the four-kind schema — foreign or malformed keys are
    /// ignored rather than treated as errors.
    pub fn parse(s: &str) -> Option<NodeKey> {
        let tokens: Vec<&str> = s.split('|').collect();
        match tokens.as_slice() {
            ["hub", hub_id] => Some(NodeKey::Hub {
                hub_id: (*hub_id).to_string(),
            }),
            ["prj", hub_id, project_id] => Some(NodeKey::Project {
                hub_id: (*hub_id).to_string(),
                project_id: (*project_id).to_string(),
            }),
            ["fld", hub_id, project_id, folder_id] => Some(NodeKey::Folder {
                hub_id: (*hub_id).to_string(),
                project_id: (*project_id).to_string(),
                folder_id: (*folder_id).to_string(),
            }),
            ["itm", hub_id, project_id, item_id, urn] => Some(NodeKey::Item {
                hub_id: (*hub_id).to_string(),
                project_id: (*project_id).to_string(),
                item_id: (*item_id).to_string(),
                urn: (*urn).to_string(),
            }),
            _ => None,
        }
    }

    /// The node's own id, the last path segment before any urn.
    pub fn local_id(&self) -> &str {
        match self {
            NodeKey::Hub { hub_id } => hub_id,
            NodeKey::Project { project_id, .. } => project_id,
            NodeKey::Folder { folder_id, .. } => folder_id,
            NodeKey::Item { item_id, .. } => item_id,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Hub { hub_id } => write!(f, "hub|{hub_id}"),
            NodeKey::Project { hub_id, project_id } => write!(f, "prj|{hub_id}|{project_id}"),
            NodeKey::Folder {
                hub_id,
                project_id,
                folder_id,
            } => write!(f, "fld|{hub_id}|{project_id}|{folder_id}"),
            NodeKey::Item {
                hub_id,
                project_id,
                item_id,
                urn,
            } => write!(f, "itm|{hub_id}|{project_id}|{item_id}|{urn}"),
        }
    }
}

/// Load/expansion state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not expanded; children may or may not be loaded yet
    Collapsed,
    /// First expansion in flight
    Loading,
    /// Children loaded and visible
    Expanded,
    /// Last expansion attempt failed; the next expand retries
    Error,
}

/// A displayed tree entry. Construction is pure — no fetch ever happens
/// before the node's first expansion.
#[derive(Debug)]
pub struct TreeNode {
    pub id: NodeId,
    pub key: NodeKey,
    /// Opaque display text; arbitrary user-chosen content, never
    /// structurally interpreted.
    pub label: String,
    pub parent: Option<NodeId>,
    /// `None` until the first successful expansion — distinct from
    /// `Some(vec![])`, which means loaded and empty.
    pub children: Option<Vec<NodeId>>,
    pub state: NodeState,
}

impl TreeNode {
    pub fn new(id: NodeId, key: NodeKey, label: String, parent: Option<NodeId>) -> Self {
        Self {
            id,
            key,
            label,
            parent,
            children: None,
            state: NodeState::Collapsed,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.key.kind()
    }

    pub fn is_expandable(&self) -> bool {
        self.kind().expandable()
    }

    /// Whether children have been fetched (even if the result was empty).
    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.state == NodeState::Expanded
    }

    pub fn is_collapsed(&self) -> bool {
        self.state == NodeState::Collapsed
    }

    pub fn is_loading(&self) -> bool {
        self.state == NodeState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.state == NodeState::Error
    }
}
