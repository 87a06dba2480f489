//! Signing-key verification status

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verification state of the domain signing record
///
/// `Checking` is transient: it resolves to `Valid`/`Invalid`, or back to
/// `Unknown` when the check could not be performed. It is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Unknown,
    Checking,
    Valid,
    Invalid,
}

impl VerificationStatus {
    /// Parse a status reported by the DNS-check service. Unrecognized text
    /// maps to `None` so callers can treat it as "could not determine".
    pub fn from_report(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "valid" | "pass" | "ok" => Some(VerificationStatus::Valid),
            "invalid" | "fail" | "missing" => Some(VerificationStatus::Invalid),
            "unknown" => Some(VerificationStatus::Unknown),
            _ => None,
        }
    }

    /// The value a save payload carries; `Checking` is never persisted.
    pub fn persisted(self) -> Self {
        match self {
            VerificationStatus::Checking => VerificationStatus::Unknown,
            other => other,
        }
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, VerificationStatus::Checking)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Unknown => write!(f, "unknown"),
            VerificationStatus::Checking => write!(f, "checking"),
            VerificationStatus::Valid => write!(f, "valid"),
            VerificationStatus::Invalid => write!(f, "invalid"),
        }
    }
}
