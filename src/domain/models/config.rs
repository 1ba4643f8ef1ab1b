//! Runtime configuration models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Partial-failure policy for artifact downloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactPolicy {
    /// One failed download aborts the whole batch.
    #[default]
    FailFast,
    /// Failed downloads are logged and dropped; the rest are kept.
    SkipFailed,
}

/// Retry settings applied by the HTTP request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            timeout_secs: 30,
        }
    }
}

/// Top-level configuration for a progress run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Build/release channel to track.
    pub channel: String,
    /// Starting commit ref for the backward walk.
    pub commit: String,
    /// Task-name filter patterns; `!`-prefixed patterns are exclusions.
    pub filters: Vec<String>,
    /// Interop scoring year.
    pub year: String,
    /// Fetch reference data from remote services instead of local copies.
    pub remote: bool,
    /// Keep scanning older commits when a task group is incomplete.
    pub scan: bool,
    pub artifact_policy: ArtifactPolicy,
    /// Taskcluster deployment root URL.
    pub root_url: String,
    /// Override the Mercurial base URL. Defaults to the channel's
    /// hg.mozilla.org repository.
    pub hg_url: Option<String>,
    /// Directory holding local copies of the reference documents.
    pub data_dir: PathBuf,
    /// Path of the completed-task cache file.
    pub cache_path: PathBuf,
    pub retry: RetryConfig,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            channel: "mozilla-central".to_string(),
            commit: "tip".to_string(),
            filters: Vec::new(),
            year: "2025".to_string(),
            remote: false,
            scan: false,
            artifact_policy: ArtifactPolicy::default(),
            root_url: "https://firefox-ci-tc.services.mozilla.com".to_string(),
            hg_url: None,
            data_dir: PathBuf::from("static"),
            cache_path: PathBuf::from(".wpt-progress/completed-tasks.json"),
            retry: RetryConfig::default(),
        }
    }
}

impl ProgressConfig {
    /// Mercurial repository base URL for the configured channel.
    ///
    /// Integration and release channels live under prefixed paths on
    /// hg.mozilla.org; everything else maps directly.
    pub fn hg_base_url(&self) -> String {
        if let Some(url) = &self.hg_url {
            return url.clone();
        }
        let repo = match self.channel.as_str() {
            "autoland" | "mozilla-inbound" => format!("integration/{}", self.channel),
            "mozilla-beta" | "mozilla-release" => format!("releases/{}", self.channel),
            _ => self.channel.clone(),
        };
        format!("https://hg.mozilla.org/{repo}")
    }
}
