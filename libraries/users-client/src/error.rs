//! Error types for the users client.

use thiserror::Error;

/// Errors that can occur when talking to the users service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-2xx response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Base URL missing or unusable
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// True when the server answered 404.
    ///
    /// Callers use this for logging only; a missing record is handled the
    /// same way as any other failed request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::ServerError { status: 404, .. })
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ServerError { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for users client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
