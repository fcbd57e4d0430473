//! HTTP client for the Data Management REST endpoints.

use crate::api::backend::{Entity, FolderListing, ListingBackend};
use crate::api::raw::{self, Envelope, SingleEnvelope};
use crate::error::Error;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

/// Production service host.
pub const DEFAULT_HOST: &str = "https://developer.api.autodesk.com";

/// Client for the read-only Data Management queries, attaching the bearer
/// token to every request. No retry, no backoff; the transport's own
/// timeouts apply.
pub struct DataManagementClient {
    client: reqwest::Client,
    access_token: String,
    host: String,
}

impl DataManagementClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Point the client at a different host (tests, proxies, regions).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}{}", self.host, path)).map_err(|e| Error::Host(e.to_string()))
    }

    /// URL for one version resource; the version id is a urn with
    /// characters that must be percent-encoded in a path segment.
    fn version_endpoint(&self, project_id: &str, version_id: &str) -> Result<Url, Error> {
        let mut url = self.endpoint(&format!("/data/v1/projects/{project_id}/versions"))?;
        url.path_segments_mut()
            .map_err(|_| Error::Host("host cannot be a base URL".to_string()))?
            .push(version_id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("listing request failed with {}: {}", status, message);
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    /// List the versions of one item, newest first (server order).
    pub async fn list_item_versions(
        &self,
        project_id: &str,
        item_id: &str,
    ) -> Result<Vec<Entity>, Error> {
        let url = self.endpoint(&format!("/data/v1/projects/{project_id}/items/{item_id}/versions"))?;
        let envelope: Envelope = self.get_json(url).await?;
        raw::to_entities(envelope)
    }

    /// Fetch one version resource by its (decoded) version id.
    pub async fn get_version(&self, project_id: &str, version_id: &str) -> Result<Entity, Error> {
        let url = self.version_endpoint(project_id, version_id)?;
        let envelope: SingleEnvelope = self.get_json(url).await?;
        raw::to_entity(envelope)
    }
}

#[async_trait]
impl ListingBackend for DataManagementClient {
    async fn list_hubs(&self) -> Result<Vec<Entity>, Error> {
        let url = self.endpoint("/project/v1/hubs")?;
        let envelope: Envelope = self.get_json(url).await?;
        raw::to_entities(envelope)
    }

    async fn list_projects(&self, hub_id: &str) -> Result<Vec<Entity>, Error> {
        let url = self.endpoint(&format!("/project/v1/hubs/{hub_id}/projects"))?;
        let envelope: Envelope = self.get_json(url).await?;
        raw::to_entities(envelope)
    }

    async fn list_top_folders(
        &self,
        hub_id: &str,
        project_id: &str,
    ) -> Result<Vec<Entity>, Error> {
        let url =
            self.endpoint(&format!("/project/v1/hubs/{hub_id}/projects/{project_id}/topFolders"))?;
        let envelope: Envelope = self.get_json(url).await?;
        raw::to_entities(envelope)
    }

    async fn list_folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<FolderListing, Error> {
        let url = self
            .endpoint(&format!("/data/v1/projects/{project_id}/folders/{folder_id}/contents"))?;
        let envelope: Envelope = self.get_json(url).await?;
        raw::to_folder_listing(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_configured_host() {
        let client = DataManagementClient::new("token").with_host("http://localhost:8080");
        let url = client.endpoint("/project/v1/hubs").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/project/v1/hubs");
    }

    #[test]
    fn test_endpoint_rejects_bad_host() {
        let client = DataManagementClient::new("token").with_host("not a url");
        assert!(matches!(
            client.endpoint("/project/v1/hubs"),
            Err(Error::Host(_))
        ));
    }

    #[test]
    fn test_version_endpoint_percent_encodes_the_id() {
        let client = DataManagementClient::new("token");
        let url = client
            .version_endpoint("b.proj", "urn:adsk.wip:fs.file:vf.abc?version=1")
            .unwrap();
        let path = url.path();
        assert!(path.starts_with("/data/v1/projects/b.proj/versions/"));
        // '?' would otherwise start a query string
        assert!(path.contains("%3Fversion=1"));
    }

    #[test]
    fn test_version_endpoint_encodes_slashes() {
        let client = DataManagementClient::new("token");
        let url = client.version_endpoint("b.proj", "a/b").unwrap();
        assert!(url.path().ends_with("/versions/a%2Fb"));
    }
}
