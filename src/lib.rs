// Hub browser library - lazy-loading tree over the Data Management
// hierarchy (hubs -> projects -> folders -> items), UI-agnostic: the
// caller renders the tree state and feeds expansion and selection
// commands back in.

pub mod api;
pub mod error;
pub mod selection;
pub mod tree;
pub mod urn;

pub use api::{DataManagementClient, Entity, EntryType, FolderEntry, FolderListing, ListingBackend};
pub use error::Error;
pub use selection::{Credentials, Selection};
pub use tree::{HubTree, HubTreeView, NodeId, NodeKey, NodeKind, NodeState, TreeNode};

use std::sync::Arc;

/// Start a browsing session: build a client from the credentials, fetch
/// the hub listing once, and wire the selection callback. The sole entry
/// point; call once per session after credentials are available.
pub async fn init<F>(credentials: Credentials, on_selection: F) -> Result<HubTreeView, Error>
where
    F: FnMut(Selection) + Send + 'static,
{
    let client = DataManagementClient::new(credentials.access_token);
    let tree = HubTree::init(Arc::new(client)).await?;
    Ok(HubTreeView::new(tree, on_selection))
}
