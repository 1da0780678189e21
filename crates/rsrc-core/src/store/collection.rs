//! Backing collections holding shot documents.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use anyhow::Context;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;

use super::{ShotDocument, StoreError};

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A document collection addressed by shot name.
pub trait ShotCollection: Send + Sync {
    /// Fetch the document for `shot_name`, or `None` if there is none.
    fn find_shot(
        &self,
        shot_name: &str,
    ) -> impl Future<Output = Result<Option<ShotDocument>, StoreError>> + Send;
}

/// In-memory collection, used for tests and document files.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: HashMap<String, ShotDocument>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, replacing any with the same shot name.
    pub fn insert(&mut self, document: ShotDocument) {
        self.documents.insert(document.shot_name.clone(), document);
    }

    pub fn with_document(mut self, document: ShotDocument) -> Self {
        self.insert(document);
        self
    }

    /// Build from a JSON array of shot documents.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let documents: Vec<ShotDocument> =
            serde_json::from_str(json).context("Failed to parse shot documents")?;
        Ok(documents.into_iter().fold(Self::new(), Self::with_document))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read documents file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid documents file: {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ShotCollection for MemoryCollection {
    async fn find_shot(&self, shot_name: &str) -> Result<Option<ShotDocument>, StoreError> {
        Ok(self.documents.get(shot_name).cloned())
    }
}

/// Shot document service reached over HTTP.
///
/// `GET {base_url}/shots/{shot_name}` returns the document as JSON;
/// 404 means the shot does not exist.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCollection {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rsrc/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Document URL for `shot_name`; the name is encoded as one path segment.
    pub fn shot_url(&self, shot_name: &str) -> String {
        format!(
            "{}/shots/{}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(shot_name, PATH_SEGMENT)
        )
    }
}

impl ShotCollection for HttpCollection {
    async fn find_shot(&self, shot_name: &str) -> Result<Option<ShotDocument>, StoreError> {
        let url = self.shot_url(shot_name);
        tracing::debug!(%url, "fetching shot document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("{}: {}", url, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<ShotDocument>()
                .await
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
            status => Err(StoreError::Transport(format!("HTTP {} from {}", status, url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_collection_finds_documents() {
        let collection = MemoryCollection::new()
            .with_document(ShotDocument::new("AAA").with_version("geo", "v1", "/a"));

        assert!(collection.find_shot("AAA").await.unwrap().is_some());
        assert!(collection.find_shot("BBB").await.unwrap().is_none());
    }

    #[test]
    fn memory_collection_from_json() {
        let collection = MemoryCollection::from_json(
            r#"[
                {"shot_name": "AAA_084_0010", "cache_usd_geo": {"v002": "/path/geo.usda"}},
                {"shot_name": "AAA_084_0020"}
            ]"#,
        )
        .unwrap();

        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn memory_collection_rejects_invalid_json() {
        assert!(MemoryCollection::from_json("{\"shot_name\": 1}").is_err());
    }

    #[test]
    fn shot_url_encodes_segment() {
        let collection = HttpCollection::new("http://localhost:8080/").unwrap();

        assert_eq!(
            collection.shot_url("AAA_084_0010"),
            "http://localhost:8080/shots/AAA_084_0010"
        );
        assert_eq!(
            collection.shot_url("a/b"),
            "http://localhost:8080/shots/a%2Fb"
        );
    }
}
