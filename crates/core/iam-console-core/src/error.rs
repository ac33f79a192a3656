use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request to backend failed: {0}")]
    Transport(String),

    #[error("Backend rejected the request: {msg}")]
    Rejected { msg: String },

    #[error("Unexpected backend response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid resource id '{0}', expected <owner>/<name>")]
    InvalidResourceId(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type BackendResult<T> = Result<T, BackendError>;
