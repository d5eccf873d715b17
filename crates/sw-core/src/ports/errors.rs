use thiserror::Error;

/// Failure reported by a server-facing port.
///
/// The payload is the human-readable message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Bad input shape, duplicate name or path.
    #[error("{0}")]
    Validation(String),

    /// Resource already exists (e.g. an owner account).
    #[error("{0}")]
    Conflict(String),

    /// Filesystem check/create failure on the server.
    #[error("{0}")]
    Io(String),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
