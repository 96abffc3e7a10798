//! Registry client error types.

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while talking to the deployment registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure (connect, TLS, timeout) or a body that
    /// failed to decode.
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry answered with a non-success status.
    #[error("registry returned status {status} for {endpoint}")]
    Status { status: u16, endpoint: String },
}
