use crate::tree::NodeId;
use thiserror::Error;

/// Errors surfaced by listing fetches, expansion, and urn decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the listing service.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The configured service host is not a usable base URL.
    #[error("invalid service host: {0}")]
    Host(String),

    /// A listing response is missing a field the hierarchy needs.
    #[error("malformed listing: {0}")]
    MalformedListing(String),

    /// Folder contents and the version side table disagree in length,
    /// so positional correlation would misattribute urns.
    #[error("folder contents has {items} items but {urns} version records")]
    LocatorMismatch { items: usize, urns: usize },

    /// The urn of an item is not valid base64.
    #[error("invalid version urn: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded version id is not valid UTF-8.
    #[error("decoded version id is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A command referenced a node id outside the tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}
