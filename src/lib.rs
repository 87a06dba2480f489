//! Mailconf - state controller for an email settings panel
//!
//! Manages one outbound/inbound email profile per purpose (alerts, invites,
//! password resets, reports) plus a domain signing record: preset
//! application, cross-profile copying, secret-aware dirty tracking against the
//! last saved snapshot, a fallback save chain, connectivity tests and
//! signing-key verification.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    ConnectivityTestCoordinator, DomainKeyCoordinator, ProfileStore, SavePlan, SaveReport,
};
pub use config::{ConfigWarning, ControllerConfig};
pub use domain::entities::{Profile, SigningRecord};
pub use domain::value_objects::{
    FieldPath, FieldValue, Purpose, RetrievalSlot, SecurityFlag, SigningField, TestKind,
    TestOutcome, VerificationStatus,
};
pub use error::{MailconfError, MailconfResult};
