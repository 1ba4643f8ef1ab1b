//! Ports (trait interfaces) the domain exposes to infrastructure.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completed-task store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access store: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Port for the persisted completed-task slots.
///
/// One string value per key; last writer wins. Keys take the form
/// `<commit>@<channel>`.
#[async_trait]
pub trait CompletionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
