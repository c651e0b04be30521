pub mod cache;
pub mod config;
pub mod error;
pub mod manifest;
pub mod providers;
pub mod types;
pub mod update;

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::providers::{PaperProvider, PurpurProvider, VanillaProvider};
use crate::update::{ProjectReport, update_project};

/// Per-project results of one [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub projects: Vec<ProjectReport>,
}

impl RunSummary {
    /// Line printed once the manifest has been written.
    pub fn completion_message(manifest_path: &Path) -> String {
        let name = manifest_path
            .file_name()
            .unwrap_or(manifest_path.as_os_str())
            .to_string_lossy();
        format!("{} has been updated!", name)
    }

    pub fn changed(&self) -> bool {
        self.projects.iter().any(ProjectReport::changed)
    }
}

/// Load the manifest, refresh every provider's map in turn and write it back.
/// Only file errors (and failing to build the HTTP client) abort the run.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let mut versions = manifest::load(&config.manifest_path)?;
    let client = config.http_client()?;
    let mut summary = RunSummary::default();

    let paper_like = [
        ("paper", &mut versions.server.paper),
        ("folia", &mut versions.server.folia),
        ("velocity", &mut versions.proxy.velocity),
        ("waterfall", &mut versions.proxy.waterfall),
    ];
    for (project, map) in paper_like {
        let provider = PaperProvider::new(client.clone(), config.paper_api.as_str(), project);
        summary.projects.push(update_project(&provider, map).await);
    }

    let purpur = PurpurProvider::new(client.clone(), config.purpur_api.as_str());
    summary
        .projects
        .push(update_project(&purpur, &mut versions.server.purpur).await);

    let vanilla = VanillaProvider::new(client, config.mojang_manifest_url.as_str());
    summary
        .projects
        .push(update_project(&vanilla, &mut versions.server.vanilla).await);

    manifest::save(&config.manifest_path, &versions)?;
    debug!("Saved {}", config.manifest_path.display());

    Ok(summary)
}
