//! Client for the Taskcluster index service.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::domain::models::RetryConfig;

use super::error::Result;
use super::retry::RetryPolicy;
use super::types::{FindTaskResponse, ListNamespacesResponse};

pub struct IndexClient {
    http: reqwest::Client,
    root_url: String,
    retry: RetryPolicy,
}

impl IndexClient {
    pub fn new(root_url: &str, retry: &RetryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(retry.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            root_url: root_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::new(retry),
        })
    }

    /// All revisions indexed for a channel: revision hash → index namespace
    /// path.
    ///
    /// Pages through `listNamespaces` until the server stops returning a
    /// continuation token. Any page failure discards the whole mapping; a
    /// truncated page is never treated as the end of the listing.
    pub async fn list_revisions(&self, channel: &str) -> Result<HashMap<String, String>> {
        let url = format!(
            "{}/api/index/v1/namespaces/gecko.v2.{channel}.revision",
            self.root_url
        );

        let mut revisions = HashMap::new();
        let mut token: Option<String> = None;
        loop {
            let page: ListNamespacesResponse = self
                .retry
                .execute(|| {
                    let request = match &token {
                        Some(token) => self.http.get(&url).query(&[("continuationToken", token)]),
                        None => self.http.get(&url),
                    };
                    async move {
                        let response = request.send().await?;
                        super::decode("index", response).await
                    }
                })
                .await?;

            for entry in page.namespaces {
                revisions.insert(entry.name, entry.namespace);
            }
            token = page.continuation_token;
            if token.is_none() {
                break;
            }
            debug!("revision listing continues, {} so far", revisions.len());
        }

        Ok(revisions)
    }

    /// Resolve an index path to its task id.
    pub async fn find_task(&self, index_path: &str) -> Result<String> {
        let url = format!("{}/api/index/v1/task/{index_path}", self.root_url);
        let found: FindTaskResponse = self
            .retry
            .execute(|| {
                let request = self.http.get(&url);
                async move {
                    let response = request.send().await?;
                    super::decode("index", response).await
                }
            })
            .await?;
        Ok(found.task_id)
    }
}
