//! Rollback error types.

use thiserror::Error;

use fleetdeck_registry::RegistryError;

/// Result type alias for rollback operations.
pub type RollbackResult<T> = Result<T, RollbackError>;

/// Errors that can occur while rolling back a project.
#[derive(Debug, Error)]
pub enum RollbackError {
    /// No READY deployment exists past the current one; nothing was
    /// changed.
    #[error("no suitable previous deployment to roll back to")]
    NoSuitableTarget,

    /// The project has no production domain to re-point.
    #[error("project {0} has no production domain alias")]
    NoAliasedDomain(String),

    /// History fetch or alias write failed. Production routing is left
    /// at whatever the registry already reflects.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
