// Shared test support: an in-memory listing backend with canned data and
// per-endpoint fetch counters.

pub mod tracing;

use async_trait::async_trait;
use hub_browser::{Entity, EntryType, Error, FolderEntry, FolderListing, ListingBackend};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How many times each listing endpoint has been hit.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub hubs: AtomicUsize,
    pub projects: AtomicUsize,
    pub top_folders: AtomicUsize,
    pub contents: AtomicUsize,
}

/// In-memory `ListingBackend` with canned listings, fetch counters, and
/// injectable one-shot failures.
#[derive(Default)]
pub struct MockBackend {
    pub hubs: Vec<Entity>,
    /// hub id -> projects
    pub projects: HashMap<String, Vec<Entity>>,
    /// project id -> top folders
    pub top_folders: HashMap<String, Vec<Entity>>,
    /// folder id -> contents
    pub contents: HashMap<String, FolderListing>,
    /// Remaining hub-listing calls that should fail
    pub hub_failures: AtomicUsize,
    /// Remaining folder-contents calls that should fail
    pub contents_failures: AtomicUsize,
    pub calls: CallCounts,
}

impl MockBackend {
    /// The standard fixture: hub `h1` / project `p1` / folder `f1`, whose
    /// contents are one sub-folder `f2` and one item `it1` with urn
    /// `QUJD` ("ABC" encoded).
    pub fn single_path() -> Self {
        let mut backend = Self {
            hubs: vec![Entity::new("h1", "Hub A")],
            ..Self::default()
        };
        backend
            .projects
            .insert("h1".to_string(), vec![Entity::new("p1", "Project One")]);
        backend
            .top_folders
            .insert("p1".to_string(), vec![Entity::new("f1", "Project Files")]);
        backend.contents.insert(
            "f1".to_string(),
            FolderListing {
                entries: vec![
                    FolderEntry::new("f2", "Drawings", EntryType::Folder),
                    FolderEntry::new("it1", "Tower.rvt", EntryType::Item),
                ],
                version_urns: vec!["QUJD".to_string()],
            },
        );
        backend
    }

    fn unavailable() -> Error {
        Error::Status {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }

    fn not_found(what: &str) -> Error {
        Error::Status {
            status: 404,
            message: format!("{what} not found"),
        }
    }
}

/// Consume one injected failure if any are left.
fn take_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl ListingBackend for MockBackend {
    async fn list_hubs(&self) -> Result<Vec<Entity>, Error> {
        self.calls.hubs.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.hub_failures) {
            return Err(Self::unavailable());
        }
        Ok(self.hubs.clone())
    }

    async fn list_projects(&self, hub_id: &str) -> Result<Vec<Entity>, Error> {
        self.calls.projects.fetch_add(1, Ordering::SeqCst);
        self.projects
            .get(hub_id)
            .cloned()
            .ok_or_else(|| Self::not_found("hub"))
    }

    async fn list_top_folders(
        &self,
        _hub_id: &str,
        project_id: &str,
    ) -> Result<Vec<Entity>, Error> {
        self.calls.top_folders.fetch_add(1, Ordering::SeqCst);
        self.top_folders
            .get(project_id)
            .cloned()
            .ok_or_else(|| Self::not_found("project"))
    }

    async fn list_folder_contents(
        &self,
        _project_id: &str,
        folder_id: &str,
    ) -> Result<FolderListing, Error> {
        self.calls.contents.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.contents_failures) {
            return Err(Self::unavailable());
        }
        self.contents
            .get(folder_id)
            .cloned()
            .ok_or_else(|| Self::not_found("folder"))
    }
}
