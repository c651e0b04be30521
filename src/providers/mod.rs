//! Release API clients, one per distribution family.

pub mod paper;
pub mod purpur;
pub mod vanilla;

pub use paper::PaperProvider;
pub use purpur::PurpurProvider;
pub use vanilla::VanillaProvider;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, UpdaterError};

/// A distribution whose versions can be listed and resolved to a download URL.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Display name used in log lines, e.g. "Paper".
    fn name(&self) -> &str;

    /// Line logged before the provider's versions are processed.
    fn header(&self) -> String {
        format!("== Checking {} ==", self.name())
    }

    /// All versions to process, in the order they should be handled.
    async fn list_versions(&self) -> Result<Vec<String>>;

    /// Download URL of the latest build for `version`.
    async fn resolve_download_url(&self, version: &str) -> Result<String>;
}

/// `base` with `segments` appended as percent-encoded path segments, so a
/// version like `1.21 pre/1` stays a single segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = |reason: String| UpdaterError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and decode the JSON body. 404 maps to `NotFound`, any other
/// non-success status or an undecodable body to `InvalidResponse`.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(UpdaterError::NotFound(url.to_string()));
    }

    if !response.status().is_success() {
        return Err(UpdaterError::InvalidResponse(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpdaterError::InvalidResponse(format!("{}: {}", url, e)))
}

/// Plain string comparison, newest first for the usual `1.x.y` shapes.
/// `1.9` lands above `1.10`; callers only rely on the set, not the order.
pub(crate) fn sort_descending(versions: &mut [String]) {
    versions.sort_by(|a, b| b.cmp(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        value: u32,
    }

    #[test]
    fn endpoint_escapes_each_segment() {
        let url = endpoint("http://localhost:8080", &["v2", "purpur", "1.21 pre/1?#"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v2/purpur/1.21%20pre%2F1%3F%23");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = endpoint("https://mirror.example/api/", &["v3", "projects", "paper"]).unwrap();
        assert_eq!(url.as_str(), "https://mirror.example/api/v3/projects/paper");
    }

    #[test]
    fn endpoint_rejects_unparsable_base() {
        let result = endpoint("not a url", &["v2"]);
        assert!(matches!(result, Err(UpdaterError::InvalidUrl { .. })));
    }

    #[test]
    fn sort_descending_is_lexicographic() {
        let mut versions = vec!["1.9".to_string(), "1.21.1".to_string(), "1.10".to_string()];
        sort_descending(&mut versions);
        assert_eq!(versions, vec!["1.9", "1.21.1", "1.10"]);
    }

    #[tokio::test]
    async fn get_json_decodes_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": 3}"#)
            .create_async()
            .await;

        let body: Body = get_json(&Client::new(), &format!("{}/ok", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body.value, 3);
    }

    #[tokio::test]
    async fn get_json_maps_status_codes() {
        let mut server = Server::new_async().await;
        let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
        let _broken = server.mock("GET", "/broken").with_status(500).create_async().await;
        let client = Client::new();

        let missing = get_json::<Body>(&client, &format!("{}/missing", server.url())).await;
        let broken = get_json::<Body>(&client, &format!("{}/broken", server.url())).await;

        assert!(matches!(missing, Err(UpdaterError::NotFound(_))));
        assert!(matches!(broken, Err(UpdaterError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn get_json_rejects_unexpected_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/html")
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let result = get_json::<Body>(&Client::new(), &format!("{}/html", server.url())).await;

        assert!(matches!(result, Err(UpdaterError::InvalidResponse(_))));
    }
}
