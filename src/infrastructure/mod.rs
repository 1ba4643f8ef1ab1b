//! Infrastructure layer: external service clients and persistence.

pub mod cache;
pub mod config;
pub mod hg;
pub mod reference;
pub mod taskcluster;

pub use cache::FileStore;
pub use config::{ConfigError, ConfigLoader};
pub use hg::{CommitWalker, HgClient, HgError};
pub use reference::{ReferenceClient, ReferenceError};
pub use taskcluster::{IndexClient, QueueClient, TaskclusterError};
