//! Mercurial log endpoints and the backward commit walk.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::models::CommitDescription;

/// Errors from the commit-log service.
#[derive(Error, Debug)]
pub enum HgError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote reported an error for the current ref. Fatal; not the same
    /// as running out of history.
    #[error("commit log reported an error: {0}")]
    Log(String),

    #[error("failed to decode log response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct Changeset {
    node: String,
    #[serde(default)]
    parents: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ShortLog {
    #[serde(default)]
    changesets: Vec<Changeset>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChangesetDetail {
    desc: String,
}

/// Client for the hg.mozilla.org JSON endpoints.
#[derive(Debug, Clone)]
pub struct HgClient {
    http: reqwest::Client,
    base_url: String,
}

impl HgClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HgError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn short_log(&self, rev: &str) -> Result<ShortLog, HgError> {
        let url = format!("{}/json-shortlog/{rev}", self.base_url);
        let response = self.http.get(&url).send().await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Changeset summary for display. Degrades to "Not found" with an empty
    /// href on any fetch or decode failure; never errors.
    pub async fn commit_description(&self, commit: &str) -> CommitDescription {
        let short: String = commit.chars().take(10).collect();
        let url = format!("{}/json-changeset/{commit}", self.base_url);

        let fetched: Result<ChangesetDetail, HgError> = async {
            let response = self.http.get(&url).send().await?;
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        }
        .await;

        match fetched {
            Ok(detail) => CommitDescription {
                commit: short,
                description: detail.desc,
                href: format!("{}/changeset/{commit}", self.base_url),
            },
            Err(err) => {
                debug!("no changeset description for {commit}: {err}");
                CommitDescription {
                    commit: short,
                    description: "Not found".to_string(),
                    href: String::new(),
                }
            }
        }
    }

    /// Begin a fresh backward walk from `start`.
    pub fn walk(&self, start: &str) -> CommitWalker {
        CommitWalker {
            client: self.clone(),
            next_ref: Some(start.to_string()),
            buffer: VecDeque::new(),
        }
    }
}

/// Lazy backward iteration over commit ids.
///
/// Each refill fetches one short-log page, yields every commit on it in page
/// order, then advances to the first parent of the page's last entry.
/// `next()` returns `Ok(None)` when history is exhausted and `Err` when the
/// remote reports an error; the two are deliberately distinct. Walks are not
/// restartable; build a new one per attempt.
pub struct CommitWalker {
    client: HgClient,
    next_ref: Option<String>,
    buffer: VecDeque<String>,
}

impl CommitWalker {
    pub async fn next(&mut self) -> Result<Option<String>, HgError> {
        loop {
            if let Some(node) = self.buffer.pop_front() {
                return Ok(Some(node));
            }
            let Some(current) = self.next_ref.take() else {
                return Ok(None);
            };

            let log = self.client.short_log(&current).await?;
            if let Some(message) = log.error {
                return Err(HgError::Log(message));
            }

            self.next_ref = log
                .changesets
                .last()
                .and_then(|changeset| changeset.parents.first().cloned());
            self.buffer
                .extend(log.changesets.into_iter().map(|changeset| changeset.node));
        }
    }
}
