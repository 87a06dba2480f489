//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod field_path;
mod purpose;
mod secret;
mod test_kind;
mod verification_status;

pub use config_warning::ConfigWarning;
pub use field_path::{
    FieldPath, FieldValue, RetrievalField, RetrievalSlot, SecurityFlag, SigningField,
    TransportField,
};
pub use purpose::Purpose;
pub use secret::{Secret, SecretField};
pub use test_kind::{TestKind, TestOutcome};
pub use verification_status::VerificationStatus;
