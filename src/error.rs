//! Error types for mailconf
//!
//! Uses `thiserror` for library errors. Port implementations report
//! [`BackendError`](crate::domain::ports::BackendError); the application layer
//! wraps those into [`MailconfError::Remote`] with the operation that failed.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::{Purpose, TestKind};

/// Result type alias for mailconf operations
pub type MailconfResult<T> = Result<T, MailconfError>;

/// Main error type for mailconf operations
#[derive(Error, Debug)]
pub enum MailconfError {
    /// Preset key not present in the catalog
    #[error("unknown preset '{key}'")]
    UnknownPreset { key: String },

    /// Purpose string did not name a known profile
    #[error("unknown purpose '{value}'")]
    UnknownPurpose { value: String },

    /// Dotted field path did not resolve to a profile field
    #[error("unknown field path '{path}'")]
    InvalidFieldPath { path: String },

    /// Value kind does not fit the addressed field
    #[error("field '{path}' expects {expected}")]
    FieldTypeMismatch { path: String, expected: &'static str },

    /// `sendMessage` test issued without a recipient
    #[error("a recipient address is required to send a test message")]
    RecipientRequired,

    /// Recipient present but not an email address
    #[error("'{recipient}' is not a valid email address")]
    InvalidRecipient { recipient: String },

    /// Domain-key check issued with a blank domain or selector
    #[error("domain and selector are required to check the signing key")]
    DomainKeyFieldsRequired,

    /// A test for the same kind and purpose is still pending
    #[error("a {kind} test for {purpose} is already in progress")]
    TestInFlight { kind: TestKind, purpose: Purpose },

    /// The signing record is already being checked
    #[error("a signing key check is already in progress")]
    CheckInFlight,

    /// Load or save already running on this store
    #[error("cannot {requested} while {running} is in progress")]
    Busy {
        requested: &'static str,
        running: &'static str,
    },

    /// A remote collaborator failed
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    /// Every save strategy was rejected
    #[error("saving email settings failed: {}", attempts.join("; "))]
    SaveFailed { attempts: Vec<String> },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MailconfError {
    /// Whether the error was raised locally without contacting any service.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            MailconfError::Remote { .. } | MailconfError::SaveFailed { .. }
        )
    }

    /// Text suitable for a toast; remote errors show the service's own message.
    pub fn user_message(&self) -> String {
        match self {
            MailconfError::Remote { message, .. } => message.clone(),
            MailconfError::SaveFailed { attempts } => attempts
                .last()
                .cloned()
                .unwrap_or_else(|| self.to_string()),
            other => other.to_string(),
        }
    }
}
