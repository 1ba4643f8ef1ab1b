//! Reference documents backing the expected-test universe.
//!
//! Three read-only JSON documents: interop focus areas by year, scoring
//! categories by year, and per-test label metadata. Each is fetched whole,
//! remotely or from a local copy under `data_dir`.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Scoring category definitions maintained by the results-analysis project.
pub const CATEGORY_URL: &str = "https://raw.githubusercontent.com/web-platform-tests/results-analysis/main/interop-scoring/category-data.json";

/// Test-level label metadata from wpt.fyi.
pub const METADATA_URL: &str =
    "https://wpt.fyi/api/metadata?includeTestLevel=true&product=firefox";

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {document}: {source}")]
    Fetch {
        document: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {document} from {path}: {source}")]
    Read {
        document: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{document} is not valid JSON: {source}")]
    Decode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches the interop, category, and metadata documents.
pub struct ReferenceClient {
    http: reqwest::Client,
    remote: bool,
    data_dir: PathBuf,
    category_url: String,
    metadata_url: String,
}

impl ReferenceClient {
    pub fn new(remote: bool, data_dir: PathBuf, timeout: Duration) -> Result<Self, ReferenceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReferenceError::Client)?;
        Ok(Self {
            http,
            remote,
            data_dir,
            category_url: CATEGORY_URL.to_string(),
            metadata_url: METADATA_URL.to_string(),
        })
    }

    /// Override the remote document URLs. Intended for tests pointed at a
    /// mock server.
    pub fn with_remote_urls(mut self, category_url: String, metadata_url: String) -> Self {
        self.category_url = category_url;
        self.metadata_url = metadata_url;
        self
    }

    /// Interop focus-area definitions by year.
    ///
    /// wpt.fyi does not serve this document cross-origin, so remote mode
    /// falls back on the local copy.
    pub async fn interop(&self) -> Result<Value, ReferenceError> {
        if self.remote {
            warn!("interop data cannot be fetched remotely, falling back on local copy");
        }
        self.read_local("interop data", "interop-data.json").await
    }

    /// Scoring category definitions by year.
    pub async fn categories(&self) -> Result<Value, ReferenceError> {
        if self.remote {
            self.fetch("category data", &self.category_url).await
        } else {
            self.read_local("category data", "category-data.json").await
        }
    }

    /// Per-test label metadata.
    pub async fn metadata(&self) -> Result<Value, ReferenceError> {
        if self.remote {
            self.fetch("test metadata", &self.metadata_url).await
        } else {
            self.read_local("test metadata", "metadata.json").await
        }
    }

    async fn fetch(&self, document: &'static str, url: &str) -> Result<Value, ReferenceError> {
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| ReferenceError::Fetch { document, source })?
            .text()
            .await
            .map_err(|source| ReferenceError::Fetch { document, source })?;
        serde_json::from_str(&body).map_err(|source| ReferenceError::Decode { document, source })
    }

    async fn read_local(
        &self,
        document: &'static str,
        filename: &str,
    ) -> Result<Value, ReferenceError> {
        let path = self.data_dir.join(filename);
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ReferenceError::Read {
                document,
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| ReferenceError::Decode { document, source })
    }
}
