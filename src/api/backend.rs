use crate::error::Error;
use async_trait::async_trait;

/// A hub, project, or folder as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub name: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Type of entry inside a folder listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Folder,
    Item,
}

/// A single folder-contents entry, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    pub entry_type: EntryType,
}

impl FolderEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entry_type,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.entry_type == EntryType::Folder
    }

    pub fn is_item(&self) -> bool {
        self.entry_type == EntryType::Item
    }
}

/// Contents of one folder: sub-folders and items interleaved in server
/// order, plus the version urn side table.
///
/// `version_urns` correlates to the item entries only, by position: the
/// i-th item entry (counting items alone, in order) carries
/// `version_urns[i]`. The tree validates the lengths before correlating.
#[derive(Debug, Clone, Default)]
pub struct FolderListing {
    pub entries: Vec<FolderEntry>,
    pub version_urns: Vec<String>,
}

impl FolderListing {
    /// Number of item entries, the length `version_urns` must match.
    pub fn item_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_item()).count()
    }
}

/// Async listing backend trait
///
/// This trait abstracts the read-only Data Management queries so the tree
/// can be driven against the real HTTP service or an in-memory test
/// double. All listings preserve server order; callers must not re-sort.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// List the hubs visible to the current credentials.
    async fn list_hubs(&self) -> Result<Vec<Entity>, Error>;

    /// List the projects under one hub.
    async fn list_projects(&self, hub_id: &str) -> Result<Vec<Entity>, Error>;

    /// List the top-level folders of a project.
    async fn list_top_folders(&self, hub_id: &str, project_id: &str)
        -> Result<Vec<Entity>, Error>;

    /// List the contents of one folder, including the version urn side
    /// table for its items.
    async fn list_folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<FolderListing, Error>;
}
