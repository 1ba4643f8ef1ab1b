use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the Taskcluster index and queue services.
#[derive(Error, Debug)]
pub enum TaskclusterError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskclusterError {
    /// Whether a retry can plausibly succeed.
    ///
    /// Rate limiting and server errors are transient; client errors and
    /// malformed payloads are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout() || err.is_connect(),
            Self::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Decode { .. } => false,
        }
    }
}

/// Result type alias for Taskcluster operations.
pub type Result<T> = std::result::Result<T, TaskclusterError>;
