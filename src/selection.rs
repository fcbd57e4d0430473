use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer-token holder handed over by whatever performed the login.
///
/// The browser never refreshes or inspects the token; it only attaches it
/// to listing requests.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// The decoded projection of a selected item node, emitted to the
/// caller-supplied callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Hub the item lives under
    pub hub_id: String,
    /// Project the item lives under
    pub project_id: String,
    /// The item itself
    pub item_id: String,
    /// Decoded version id of the design to load
    pub version_id: String,
    /// The still-encoded urn, as carried in the node key
    pub urn: String,
}
