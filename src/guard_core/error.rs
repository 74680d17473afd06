use std::time::Duration;

use async_openai::error::OpenAIError;
use thiserror::Error;

/// Failures of the completion call itself. These always reach the caller;
/// they are never turned into a decision.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network, authentication or rate limit failure reported by the client
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    /// The request was refused before anything was sent
    #[error("invalid completion request: {0}")]
    InvalidRequest(String),
}

impl From<OpenAIError> for UpstreamError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::InvalidArgument(msg) => UpstreamError::InvalidRequest(msg),
            other => UpstreamError::Transport(other.to_string()),
        }
    }
}

/// Errors surfaced at the HTTP boundary
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub type Result<T> = std::result::Result<T, GuardError>;
