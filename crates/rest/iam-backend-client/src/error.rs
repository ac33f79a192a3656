//! Backend client error types.

use iam_console_core::BackendError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    BackendError(#[from] BackendError),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Not an email address or phone number: {0}")]
    InvalidDestination(String),
}

impl ClientError {
    /// Whether the backend answered with `status: "error"`.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::BackendError(BackendError::Rejected { .. }))
    }
}

impl From<ClientError> for BackendError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::BackendError(error) => error,
            other => BackendError::Transport(other.to_string()),
        }
    }
}
