//! Service layer: the completion/scoring pipeline.

pub mod artifacts;
pub mod expected;
pub mod filter;
pub mod poller;
pub mod progress;
pub mod scoring;

pub use artifacts::{ArtifactError, ArtifactFetcher};
pub use expected::{build_expected_tests, ExpectedError};
pub use filter::{FilterError, TaskFilter};
pub use poller::{CompletionPoller, PollError};
pub use progress::{Progress, ProgressError};
pub use scoring::{compute_score, is_failure, load_tests, score_test};
