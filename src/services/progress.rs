//! Top-level pipeline orchestration.
//!
//! Owns the service clients and the mutable "current commit" state. The flow
//! mirrors the dashboard: cache check → completion poll → artifact download →
//! expected-universe construction → scoring.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::models::{
    CommitDescription, CompletedTasks, ExpectedTests, ProgressConfig, ScoreReport, TaskRef,
    WptReport,
};
use crate::domain::ports::{CompletionStore, StoreError};
use crate::infrastructure::cache::FileStore;
use crate::infrastructure::hg::{HgClient, HgError};
use crate::infrastructure::reference::{ReferenceClient, ReferenceError};
use crate::infrastructure::taskcluster::{IndexClient, QueueClient, TaskclusterError};
use crate::services::artifacts::{ArtifactError, ArtifactFetcher};
use crate::services::expected::{build_expected_tests, ExpectedError};
use crate::services::filter::{FilterError, TaskFilter};
use crate::services::poller::{CompletionPoller, PollError};
use crate::services::scoring::{compute_score, load_tests};

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Taskcluster(#[from] TaskclusterError),

    #[error(transparent)]
    Hg(#[from] HgError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error(transparent)]
    Artifacts(#[from] ArtifactError),

    #[error(transparent)]
    Expected(#[from] ExpectedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cached entry for {key} is corrupt: {source}")]
    CorruptCache {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode cache entry: {0}")]
    EncodeCache(#[source] serde_json::Error),

    #[error("no completed commit found at or behind {0}")]
    NoCompletedCommit(String),
}

/// Persisted shape of one cache slot.
#[derive(Debug, Serialize, Deserialize)]
struct CachedTasks {
    tasks: Vec<TaskRef>,
}

pub struct Progress {
    config: ProgressConfig,
    index: IndexClient,
    queue: QueueClient,
    hg: HgClient,
    reference: ReferenceClient,
    store: Box<dyn CompletionStore>,
    filter: TaskFilter,
    /// Starts as the configured ref; `completed_tasks` is its only writer.
    commit: String,
}

impl Progress {
    pub fn new(config: ProgressConfig) -> Result<Self, ProgressError> {
        let filter = TaskFilter::new(&config.filters)?;
        let index = IndexClient::new(&config.root_url, &config.retry)?;
        let queue = QueueClient::new(&config.root_url, &config.retry)?;
        let timeout = Duration::from_secs(config.retry.timeout_secs);
        let hg = HgClient::new(config.hg_base_url(), timeout)?;
        let reference = ReferenceClient::new(config.remote, config.data_dir.clone(), timeout)?;
        let store = Box::new(FileStore::new(config.cache_path.clone()));
        let commit = config.commit.clone();

        Ok(Self {
            config,
            index,
            queue,
            hg,
            reference,
            store,
            filter,
            commit,
        })
    }

    /// Swap the completed-task store. Used by tests and embedders that keep
    /// state somewhere other than the default cache file.
    pub fn with_store(mut self, store: Box<dyn CompletionStore>) -> Self {
        self.store = store;
        self
    }

    /// The current commit ref: the configured starting ref until a poll
    /// resolves a concrete commit.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    fn cache_key(&self) -> String {
        format!("{}@{}", self.commit, self.config.channel)
    }

    /// Completed task set for the current commit, from cache when available.
    pub async fn completed_tasks(&mut self) -> Result<CompletedTasks, ProgressError> {
        let key = self.cache_key();
        if let Some(raw) = self.store.get(&key).await? {
            info!("using previously fetched completed tasks");
            let cached: CachedTasks = serde_json::from_str(&raw)
                .map_err(|source| ProgressError::CorruptCache { key, source })?;
            return Ok(CompletedTasks::new(self.commit.clone(), cached.tasks));
        }

        let poller = CompletionPoller::new(
            &self.index,
            &self.queue,
            &self.hg,
            &self.filter,
            &self.config.channel,
            self.config.scan,
        );
        let Some(completed) = poller.poll(&self.commit).await? else {
            return Err(ProgressError::NoCompletedCommit(self.commit.clone()));
        };

        self.commit = completed.commit.clone();
        let value = serde_json::to_string(&CachedTasks {
            tasks: completed.tasks.clone(),
        })
        .map_err(ProgressError::EncodeCache)?;
        self.store.set(&self.cache_key(), &value).await?;

        Ok(completed)
    }

    /// Download the report artifacts for a completed task set.
    pub async fn download_reports(
        &self,
        tasks: &[TaskRef],
    ) -> Result<Vec<WptReport>, ProgressError> {
        let fetcher = ArtifactFetcher::new(&self.queue, self.config.artifact_policy);
        Ok(fetcher.download_reports(tasks).await?)
    }

    /// Expected-test universe for the configured year.
    pub async fn expected_tests(&self) -> Result<ExpectedTests, ProgressError> {
        let categories = self.reference.categories().await?;
        let interop = self.reference.interop().await?;
        let metadata = self.reference.metadata().await?;
        Ok(build_expected_tests(
            &self.config.year,
            &interop,
            &categories,
            &metadata,
        )?)
    }

    /// Run the whole pipeline and score the resolved run.
    pub async fn score(&mut self) -> Result<ScoreReport, ProgressError> {
        let completed = self.completed_tasks().await?;
        let reports = self.download_reports(&completed.tasks).await?;
        let expected = self.expected_tests().await?;
        let results = load_tests(&reports, &expected.tests);
        Ok(compute_score(&results, &expected))
    }

    /// Description of the current commit, for display.
    pub async fn commit_description(&self) -> CommitDescription {
        self.hg.commit_description(&self.commit).await
    }
}
