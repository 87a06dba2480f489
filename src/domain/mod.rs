//! Domain Layer
//!
//! The core of mailconf - pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Profile, SigningRecord, Snapshot
//! - `value_objects/` - Purpose, FieldPath, SecretField, TestKind, VerificationStatus
//! - `services/` - Validation and sanitization
//! - `policies/` - Preset catalog
//! - `ports/` - Interfaces to the settings, test and DNS-check services
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
