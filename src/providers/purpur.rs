//! Purpur v2 API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Provider, endpoint, get_json, sort_descending};
use crate::error::{Result, UpdaterError};

pub struct PurpurProvider {
    client: Client,
    base_url: String,
}

impl PurpurProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    #[serde(default)]
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    #[serde(default)]
    builds: Builds,
}

#[derive(Debug, Default, Deserialize)]
struct Builds {
    #[serde(default)]
    latest: String,
}

#[async_trait]
impl Provider for PurpurProvider {
    fn name(&self) -> &str {
        "Purpur"
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, &["v2", "purpur"])?;
        let mut versions = get_json::<ProjectResponse>(&self.client, url.as_str())
            .await?
            .versions;
        sort_descending(&mut versions);

        debug!("Found {} Purpur versions", versions.len());
        Ok(versions)
    }

    /// The download link is built from the latest build id without checking
    /// that the artifact exists.
    async fn resolve_download_url(&self, version: &str) -> Result<String> {
        let url = endpoint(&self.base_url, &["v2", "purpur", version])?;
        let latest = get_json::<VersionResponse>(&self.client, url.as_str())
            .await?
            .builds
            .latest;

        if latest.is_empty() {
            return Err(UpdaterError::NotFound(format!(
                "no latest build found for version {}",
                version
            )));
        }

        let download = endpoint(&self.base_url, &["v2", "purpur", version, latest.as_str(), "download"])?;
        Ok(download.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn list_versions_sorts_descending() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/purpur")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"project": "purpur", "versions": ["1.19.4", "1.21.1", "1.20.1"]}"#)
            .create_async()
            .await;

        let versions = PurpurProvider::new(Client::new(), server.url())
            .list_versions()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(versions, vec!["1.21.1", "1.20.1", "1.19.4"]);
    }

    #[tokio::test]
    async fn resolve_download_url_builds_link_from_latest_build() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/purpur/1.21.1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "project": "purpur",
                    "version": "1.21.1",
                    "builds": {"latest": "2329", "all": ["2328", "2329"]}
                }"#,
            )
            .create_async()
            .await;

        let purpur = PurpurProvider::new(Client::new(), server.url());
        let url = purpur.resolve_download_url("1.21.1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(url, format!("{}/v2/purpur/1.21.1/2329/download", server.url()));
    }

    #[tokio::test]
    async fn resolve_download_url_without_builds_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/purpur/1.14.1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"project": "purpur", "version": "1.14.1"}"#)
            .create_async()
            .await;

        let result = PurpurProvider::new(Client::new(), server.url())
            .resolve_download_url("1.14.1")
            .await;

        assert!(matches!(result, Err(UpdaterError::NotFound(_))));
    }
}
