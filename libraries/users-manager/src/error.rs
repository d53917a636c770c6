//! Error types for user management operations

use thiserror::Error;
use users_client::ClientError;

/// The two failure kinds an operation can end in.
///
/// Anything the network or the server did wrong is one undifferentiated
/// `RequestFailed`. `MissingInput` never reaches the network.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A required field was empty; no request was issued
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    /// The request failed (transport error or non-2xx status)
    #[error("Request failed: {0}")]
    RequestFailed(#[from] ClientError),

    /// The background refresh task panicked or was aborted
    #[error("Refresh task failed: {0}")]
    RefreshTask(String),
}

/// Result type for user management operations
pub type Result<T> = std::result::Result<T, ManagerError>;
