//! Errors reported by collaborators

use thiserror::Error;

/// Failure reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// A write was attempted and failed.
    #[error("write failed: {0}")]
    Write(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure reported by an auxiliary scoring provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider timed out after {0} ms")]
    Timeout(u64),

    #[error("provider returned an invalid response: {0}")]
    InvalidResponse(String),
}
