// Data Management query interface
//
// `backend` is the async trait seam the tree is driven through; `client`
// is the reqwest implementation against the real service; `raw` keeps the
// JSON:API wire shapes private to this module.

pub mod backend;
pub mod client;
mod raw;

pub use backend::{Entity, EntryType, FolderEntry, FolderListing, ListingBackend};
pub use client::{DataManagementClient, DEFAULT_HOST};
