//! PaperMC Fill v3 client, shared by Paper, Folia, Velocity and Waterfall.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Provider, endpoint, get_json, sort_descending};
use crate::error::{Result, UpdaterError};

const SERVER_DOWNLOAD: &str = "server:default";

pub struct PaperProvider {
    client: Client,
    base_url: String,
    project: String,
    name: String,
}

impl PaperProvider {
    pub fn new(client: Client, base_url: impl Into<String>, project: impl Into<String>) -> Self {
        let project = project.into();
        Self {
            client,
            base_url: base_url.into(),
            name: title_case(&project),
            project,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }
}

/// `GET /v3/projects/{project}`, versions grouped by major line.
#[derive(Debug, Deserialize)]
struct ProjectResponse {
    #[serde(default)]
    versions: HashMap<String, Vec<String>>,
}

/// `GET /v3/projects/{project}/versions/{version}/builds/latest`
#[derive(Debug, Deserialize)]
struct BuildResponse {
    #[serde(default)]
    downloads: HashMap<String, Download>,
}

#[derive(Debug, Deserialize)]
struct Download {
    #[serde(default)]
    url: String,
}

#[async_trait]
impl Provider for PaperProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, &["v3", "projects", self.project.as_str()])?;
        let project: ProjectResponse = get_json(&self.client, url.as_str()).await?;

        let mut versions: Vec<String> = project.versions.into_values().flatten().collect();
        sort_descending(&mut versions);

        debug!("Found {} versions for {}", versions.len(), self.project);
        Ok(versions)
    }

    async fn resolve_download_url(&self, version: &str) -> Result<String> {
        let url = endpoint(
            &self.base_url,
            &["v3", "projects", self.project.as_str(), "versions", version, "builds", "latest"],
        )?;
        let build: BuildResponse = get_json(&self.client, url.as_str()).await?;

        build
            .downloads
            .get(SERVER_DOWNLOAD)
            .map(|d| d.url.clone())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                UpdaterError::NotFound(format!(
                    "no {} download found for {} {}",
                    SERVER_DOWNLOAD, self.project, version
                ))
            })
    }
}

fn title_case(project: &str) -> String {
    let mut chars = project.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
