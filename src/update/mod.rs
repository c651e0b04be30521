use std::fmt;

use tracing::{error, info, warn};

use crate::providers::Provider;
use crate::types::{VersionEntry, VersionMap};

/// Map key for a version string: `1.21.1` becomes `1_21_1`.
pub fn version_key(version: &str) -> String {
    version.replace('.', "_")
}

/// What [`upsert`] did to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Added,
    Updated,
    UpToDate,
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Added => write!(f, "Added missing version."),
            UpdateOutcome::Updated => write!(f, "Updated download URL."),
            UpdateOutcome::UpToDate => write!(f, "Already up to date."),
        }
    }
}

/// Insert or refresh the entry for `version`. Only the URL is ever rewritten,
/// `snapshot` and any other stored fields stay as they are.
pub fn upsert(map: &mut VersionMap, version: &str, url: &str) -> UpdateOutcome {
    let key = version_key(version);
    match map.get_mut(&key) {
        None => {
            map.insert(key, VersionEntry::new(url));
            UpdateOutcome::Added
        }
        Some(entry) if entry.url != url => {
            entry.url = url.to_string();
            UpdateOutcome::Updated
        }
        Some(_) => UpdateOutcome::UpToDate,
    }
}

/// Counters for one provider pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectReport {
    pub project: String,
    pub added: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub failed: usize,
    /// Set when the version listing itself failed and nothing was processed.
    pub listing_failed: bool,
}

impl ProjectReport {
    fn record(&mut self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Added => self.added += 1,
            UpdateOutcome::Updated => self.updated += 1,
            UpdateOutcome::UpToDate => self.up_to_date += 1,
        }
    }

    pub fn changed(&self) -> bool {
        self.added + self.updated > 0
    }
}

/// Walk every version the provider lists and upsert its download URL into `map`.
/// Errors never escape: a failed listing skips the provider, a failed
/// resolution skips that version and leaves its entry alone.
pub async fn update_project<P: Provider + ?Sized>(
    provider: &P,
    map: &mut VersionMap,
) -> ProjectReport {
    let name = provider.name();
    let mut report = ProjectReport {
        project: name.to_string(),
        ..ProjectReport::default()
    };

    info!("{}", provider.header());

    let versions = match provider.list_versions().await {
        Ok(versions) => versions,
        Err(e) => {
            error!("{}: Error loading versions: {}", name, e);
            report.listing_failed = true;
            return report;
        }
    };

    for version in &versions {
        let url = match provider.resolve_download_url(version).await {
            Ok(url) => url,
            Err(e) => {
                warn!("{} {}: Error: {}", name, version, e);
                report.failed += 1;
                continue;
            }
        };

        let outcome = upsert(map, version, &url);
        info!("{} {}: {}", name, version, outcome);
        report.record(outcome);
    }

    info!(
        "{}: {} added, {} updated, {} up to date, {} failed",
        name, report.added, report.updated, report.up_to_date, report.failed
    );
    report
}
