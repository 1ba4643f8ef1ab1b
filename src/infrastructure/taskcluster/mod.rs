//! Clients for the Taskcluster index and queue services.
//!
//! Both clients apply bounded retries with jittered exponential backoff at
//! the request layer; callers above this module never retry.

pub mod error;
pub mod index;
pub mod queue;
pub mod retry;
pub mod types;

pub use error::TaskclusterError;
pub use index::IndexClient;
pub use queue::QueueClient;
pub use retry::RetryPolicy;

use serde::de::DeserializeOwned;

use error::Result;

/// Decode a response body, mapping HTTP and JSON failures onto the shared
/// error type.
pub(crate) async fn decode<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TaskclusterError::Api {
            service,
            status,
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| TaskclusterError::Decode { service, source })
}
