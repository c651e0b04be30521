use std::path::PathBuf;

use crate::types::{MOJANG_URL, PAPER_API_URL, PURPUR_API_URL};

pub const DEFAULT_MANIFEST_PATH: &str = "serviceVersions.json";

pub const MANIFEST_PATH_ENV: &str = "SERVICE_VERSIONS_PATH";
pub const PAPER_API_ENV: &str = "PAPER_API_URL";
pub const PURPUR_API_ENV: &str = "PURPUR_API_URL";
pub const MOJANG_MANIFEST_ENV: &str = "MOJANG_MANIFEST_URL";
pub const USER_AGENT_ENV: &str = "UPDATER_USER_AGENT";

/// Runtime settings. The binary takes no flags, everything comes from the
/// environment with fallbacks to the public endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub manifest_path: PathBuf,
    pub paper_api: String,
    pub purpur_api: String,
    pub mojang_manifest_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            paper_api: PAPER_API_URL.to_string(),
            purpur_api: PURPUR_API_URL.to_string(),
            mojang_manifest_url: MOJANG_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            manifest_path: get(MANIFEST_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.manifest_path),
            paper_api: get(PAPER_API_ENV)
                .map(trim_base_url)
                .unwrap_or(defaults.paper_api),
            purpur_api: get(PURPUR_API_ENV)
                .map(trim_base_url)
                .unwrap_or(defaults.purpur_api),
            mojang_manifest_url: get(MOJANG_MANIFEST_ENV).unwrap_or(defaults.mojang_manifest_url),
            user_agent: get(USER_AGENT_ENV).unwrap_or(defaults.user_agent),
        }
    }

    /// Shared HTTP client for every provider. Fill rejects requests without a user agent.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_without_variables_uses_defaults() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config, Config::default());
        assert_eq!(config.manifest_path, PathBuf::from("serviceVersions.json"));
        assert_eq!(config.paper_api, "https://fill.papermc.io");
        assert!(config.user_agent.starts_with("service-versions-updater/"));
    }

    #[test]
    fn from_lookup_overrides_and_trims_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (MANIFEST_PATH_ENV, "/srv/cloud/serviceVersions.json"),
            (PAPER_API_ENV, "http://localhost:8080/"),
            (PURPUR_API_ENV, "http://localhost:8081"),
            (MOJANG_MANIFEST_ENV, "http://localhost:8082/manifest.json"),
            (USER_AGENT_ENV, "ops-bot/2"),
        ]));

        assert_eq!(config.manifest_path, PathBuf::from("/srv/cloud/serviceVersions.json"));
        assert_eq!(config.paper_api, "http://localhost:8080");
        assert_eq!(config.purpur_api, "http://localhost:8081");
        assert_eq!(config.mojang_manifest_url, "http://localhost:8082/manifest.json");
        assert_eq!(config.user_agent, "ops-bot/2");
    }

    #[test]
    fn from_lookup_ignores_blank_values() {
        let config = Config::from_lookup(lookup_from(&[(PAPER_API_ENV, "  ")]));
        assert_eq!(config.paper_api, PAPER_API_URL);
    }
}
