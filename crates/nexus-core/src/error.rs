//! Error taxonomy shared by every collaborator.
//!
//! Uses `thiserror` so callers can match on the kind of failure. The
//! gateway maps [`CollaboratorError::Validation`] to a client error and
//! [`CollaboratorError::Internal`] to a server error whose text is never
//! shown to the caller.

use thiserror::Error;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The request was understood but its content is unacceptable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The collaborator could not complete the request.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl CollaboratorError {
    /// Convenience constructor for validation failures.
    pub fn validation(msg: impl Into<String>) -> Self {
        CollaboratorError::Validation(msg.into())
    }

    /// Convenience constructor for internal failures.
    pub fn internal(msg: impl Into<String>) -> Self {
        CollaboratorError::Internal(msg.into())
    }

    /// The bare message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CollaboratorError::Validation(msg) | CollaboratorError::Internal(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for CollaboratorError {
    fn from(err: serde_json::Error) -> Self {
        CollaboratorError::Internal(format!("serialization failed: {}", err))
    }
}
