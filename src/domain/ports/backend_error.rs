//! Errors reported by remote collaborators

use std::path::PathBuf;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BackendError {
    /// The service answered and refused the request
    #[error("{message}")]
    Rejected { message: String },

    /// The service could not be reached or timed out
    #[error("service unavailable: {message}")]
    Unavailable { message: String },

    /// The endpoint does not exist on this backend version
    #[error("{operation} is not supported by this backend")]
    Unsupported { operation: String },

    /// Stored settings could not be read back
    #[error("settings store corrupted: {path}: {message}")]
    Corrupted { path: PathBuf, message: String },
}

impl BackendError {
    pub fn rejected(message: impl Into<String>) -> Self {
        BackendError::Rejected {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        BackendError::Unavailable {
            message: message.into(),
        }
    }

    /// Text the service itself supplied, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { message } | BackendError::Unavailable { message } => {
                let trimmed = message.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}
