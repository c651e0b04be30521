use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MOJANG_URL: &str = "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";
pub const PAPER_API_URL: &str = "https://fill.papermc.io";
pub const PURPUR_API_URL: &str = "https://api.purpurmc.org";

/// One resolved download for one version.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct VersionEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
    /// Fields the updater doesn't know about, written back as they were read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VersionEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Version key (`1_21_1`) to download entry. Sorted so output is stable.
pub type VersionMap = BTreeMap<String, VersionEntry>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProxyVersions {
    #[serde(rename = "VELOCITY", default)]
    pub velocity: VersionMap,
    #[serde(rename = "BUNGEECORD", default)]
    pub bungeecord: VersionMap,
    #[serde(rename = "WATERFALL", default)]
    pub waterfall: VersionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ServerVersions {
    #[serde(rename = "PAPER", default)]
    pub paper: VersionMap,
    #[serde(rename = "PUFFERFISH", default)]
    pub pufferfish: VersionMap,
    #[serde(rename = "PURPUR", default)]
    pub purpur: VersionMap,
    #[serde(rename = "FOLIA", default)]
    pub folia: VersionMap,
    #[serde(rename = "VANILLA", default)]
    pub vanilla: VersionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The persisted `serviceVersions.json` document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ServiceVersions {
    #[serde(rename = "PROXY", default)]
    pub proxy: ProxyVersions,
    #[serde(rename = "SERVER", default)]
    pub server: ServerVersions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
