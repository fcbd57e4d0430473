//! Wire models of the JSON:API envelope the Data Management service
//! speaks, plus conversions into the crate's domain types. Parsing
//! happens once here; nothing downstream sees the raw shapes.

use crate::api::backend::{Entity, EntryType, FolderEntry, FolderListing};
use crate::error::Error;
use serde::Deserialize;

/// `{ "data": [...], "included": [...] }` listing envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub data: Vec<Resource>,
    #[serde(default)]
    pub included: Vec<Resource>,
}

/// `{ "data": {...} }` single-resource envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct SingleEnvelope {
    pub data: Resource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub relationships: Relationships,
}

/// Hubs and projects carry `name`; folders, items, and versions carry
/// `displayName`. Both are optional on the wire so one model fits all.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Attributes {
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Relationships {
    pub derivatives: Option<Relationship>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Relationship {
    pub data: RelationshipData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelationshipData {
    pub id: String,
}

impl Resource {
    /// Display label, whichever attribute the resource type carries.
    fn label(&self) -> Result<String, Error> {
        self.attributes
            .display_name
            .clone()
            .or_else(|| self.attributes.name.clone())
            .ok_or_else(|| {
                Error::MalformedListing(format!("resource {} has no display name", self.id))
            })
    }

    /// The viewable-derivative urn of a version resource.
    fn derivative_urn(&self) -> Result<String, Error> {
        self.relationships
            .derivatives
            .as_ref()
            .map(|r| r.data.id.clone())
            .ok_or_else(|| {
                Error::MalformedListing(format!("version {} has no derivatives", self.id))
            })
    }

    fn into_entity(self) -> Result<Entity, Error> {
        let name = self.label()?;
        Ok(Entity { id: self.id, name })
    }
}

/// Convert a plain listing (hubs, projects, top folders, versions) into
/// entities, preserving server order.
pub(crate) fn to_entities(envelope: Envelope) -> Result<Vec<Entity>, Error> {
    envelope.data.into_iter().map(Resource::into_entity).collect()
}

pub(crate) fn to_entity(envelope: SingleEnvelope) -> Result<Entity, Error> {
    envelope.data.into_entity()
}

/// Convert a folder-contents envelope. Entries keep their interleaved
/// server order; the `included` version records become the urn side
/// table, also in server order. Resources of any other type are skipped.
pub(crate) fn to_folder_listing(envelope: Envelope) -> Result<FolderListing, Error> {
    let mut entries = Vec::with_capacity(envelope.data.len());
    for resource in envelope.data {
        let entry_type = match resource.kind.as_str() {
            "folders" => EntryType::Folder,
            "items" => EntryType::Item,
            _ => continue,
        };
        let name = resource.label()?;
        entries.push(FolderEntry {
            id: resource.id,
            name,
            entry_type,
        });
    }

    let version_urns = envelope
        .included
        .iter()
        .map(Resource::derivative_urn)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FolderListing {
        entries,
        version_urns,
    })
}
