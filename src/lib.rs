//! wpt-progress — completion polling and interop scoring for
//! web-platform-test CI runs.
//!
//! Given a release channel and a starting ref, this crate finds the most
//! recent Mercurial revision whose Taskcluster task graph has fully finished,
//! downloads its `wptreport.json` artifacts, and scores them against the
//! expected-test universe derived from the interop reference documents.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): pure models and the persistence port
//! - **Service Layer** (`services`): filtering, polling, artifact fetch,
//!   expected-universe construction, scoring, orchestration
//! - **Infrastructure Layer** (`infrastructure`): Taskcluster/hg/reference
//!   clients, file cache, configuration
//! - **CLI Layer** (`cli`): command-line interface

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ArtifactPolicy, CategoryScore, CommitDescription, CompletedTasks, ExpectedTests,
    ProgressConfig, ResultEntry, RetryConfig, ScoreReport, TaskRef, TaskState, WptReport,
};
pub use domain::ports::{CompletionStore, StoreError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Progress, ProgressError};
