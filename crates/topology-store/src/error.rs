//! Object store errors

use thiserror::Error;

/// Errors that can occur when reading objects from the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Kubernetes API error (transport, authorization, conversion, ...)
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., malformed apiVersion)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other failure reported by the store backend
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means the requested object is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
