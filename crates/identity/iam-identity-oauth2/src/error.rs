//! Login-flow error types.

use iam_console_core::BackendError;
use thiserror::Error;

pub type AuthFlowResult<T> = Result<T, AuthFlowError>;

#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error("Invalid state parameter: {0}")]
    InvalidState(String),

    #[error("State signature mismatch")]
    StateSignatureMismatch,

    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    #[error("Unsupported login method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid RelayState: {0}")]
    InvalidRelayState(String),

    #[error("Malformed SAML metadata: {0}")]
    MalformedMetadata(String),

    #[error("SAML metadata has no {0}")]
    MissingMetadataNode(&'static str),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),
}
