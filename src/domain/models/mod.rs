//! Domain models for the progress pipeline.

pub mod commit;
pub mod config;
pub mod expected;
pub mod report;
pub mod score;
pub mod task;

pub use commit::CommitDescription;
pub use config::{ArtifactPolicy, ProgressConfig, RetryConfig};
pub use expected::ExpectedTests;
pub use report::{ResultEntry, WptReport};
pub use score::{CategoryScore, ScoreReport};
pub use task::{CompletedTasks, TaskRef, TaskState};
