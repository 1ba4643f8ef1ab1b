//! Client for the Taskcluster queue service.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::models::RetryConfig;

use super::error::Result;
use super::retry::RetryPolicy;
use super::types::{Artifact, ListArtifactsResponse, ListTaskGroupResponse};

pub struct QueueClient {
    http: reqwest::Client,
    root_url: String,
    retry: RetryPolicy,
}

impl QueueClient {
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

    /// One page of a task-group listing.
    ///
    /// Paging is caller-driven so completion judgement can abort before later
    /// pages are fetched.
    pub async fn list_task_group(
        &self,
        task_group_id: &str,
        token: Option<&str>,
    ) -> Result<ListTaskGroupResponse> {
        let url = format!("{}/api/queue/v1/task-group/{task_group_id}/list", self.root_url);
        self.retry
            .execute(|| {
                let request = match token {
                    Some(token) => self.http.get(&url).query(&[("continuationToken", token)]),
                    None => self.http.get(&url),
                };
                async move {
                    let response = request.send().await?;
                    super::decode("queue", response).await
                }
            })
            .await
    }

    /// Latest artifacts attached to a task.
    pub async fn list_latest_artifacts(&self, task_id: &str) -> Result<Vec<Artifact>> {
        let url = format!("{}/api/queue/v1/task/{task_id}/artifacts", self.root_url);
        let listing: ListArtifactsResponse = self
            .retry
            .execute(|| {
                let request = self.http.get(&url);
                async move {
                    let response = request.send().await?;
                    super::decode("queue", response).await
                }
            })
            .await?;
        Ok(listing.artifacts)
    }

    /// Deterministic URL for one artifact's content.
    pub fn artifact_url(&self, task_id: &str, artifact_name: &str) -> String {
        format!(
            "{}/api/queue/v1/task/{task_id}/artifacts/{artifact_name}",
            self.root_url
        )
    }

    /// Download and decode one artifact as JSON.
    pub async fn fetch_artifact<T: DeserializeOwned>(
        &self,
        task_id: &str,
        artifact_name: &str,
    ) -> Result<T> {
        let url = self.artifact_url(task_id, artifact_name);
        self.retry
            .execute(|| {
                let request = self.http.get(&url);
                async move {
                    let response = request.send().await?;
                    super::decode("queue", response).await
                }
            })
            .await
    }
}
