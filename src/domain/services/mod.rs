//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod sanitizer;
mod validation;

pub use sanitizer::{diff_against, snapshot_of, DirtyReport, Sanitize};
pub use validation::{
    is_valid_email, is_valid_port, transport_ready, validate_profile, Readiness,
    ValidationReport, Violation, PORT_RANGE,
};
