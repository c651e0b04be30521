//! Mojang piston-meta client. Only full releases are processed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Provider, get_json};
use crate::cache::ManifestCache;
use crate::error::{Result, UpdaterError};

const RELEASE: &str = "release";

#[derive(Debug, Deserialize)]
struct MojangVersion {
    id: String,
    url: String,
    #[serde(rename = "type")]
    version_type: String,
}

#[derive(Debug, Deserialize)]
struct MojangManifest {
    versions: Vec<MojangVersion>,
}

#[derive(Debug, Default, Deserialize)]
struct VersionJson {
    #[serde(default)]
    downloads: Downloads,
}

#[derive(Debug, Default, Deserialize)]
struct Downloads {
    server: Option<Downloadable>,
}

#[derive(Debug, Default, Deserialize)]
struct Downloadable {
    #[serde(default)]
    url: String,
}

pub struct VanillaProvider {
    client: Client,
    manifest_url: String,
    manifest: ManifestCache<MojangManifest>,
}

impl VanillaProvider {
    pub fn new(client: Client, manifest_url: impl Into<String>) -> Self {
        Self {
            client,
            manifest_url: manifest_url.into(),
            manifest: ManifestCache::new(),
        }
    }

    /// The version manifest is fetched once per provider and reused for every
    /// version lookup.
    async fn fetch_version_manifest(&self) -> Result<&MojangManifest> {
        self.manifest
            .get_or_fetch(|| async {
                let manifest: MojangManifest = get_json(&self.client, &self.manifest_url).await?;
                debug!("Loaded {} versions from Mojang manifest", manifest.versions.len());
                Ok(manifest)
            })
            .await
    }
}

#[async_trait]
impl Provider for VanillaProvider {
    fn name(&self) -> &str {
        "Vanilla"
    }

    fn header(&self) -> String {
        "== Checking Vanilla (Releases only) ==".to_string()
    }

    /// Upstream order is kept, it is already newest first.
    async fn list_versions(&self) -> Result<Vec<String>> {
        let manifest = self.fetch_version_manifest().await?;

        Ok(manifest
            .versions
            .iter()
            .filter(|v| v.version_type == RELEASE)
            .map(|v| v.id.clone())
            .collect())
    }

    async fn resolve_download_url(&self, version: &str) -> Result<String> {
        let manifest = self.fetch_version_manifest().await?;

        let Some(version_url) = manifest
            .versions
            .iter()
            .find(|v| v.id == version)
            .map(|v| v.url.as_str())
            .filter(|u| !u.is_empty())
        else {
            return Err(UpdaterError::NotFound(format!(
                "version {} not found in manifest",
                version
            )));
        };

        let version_json: VersionJson = get_json(&self.client, version_url).await?;

        version_json
            .downloads
            .server
            .map(|s| s.url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                UpdaterError::NotFound(format!("no server download found for version {}", version))
            })
    }
}
