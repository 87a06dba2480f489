//! Domain Entities
//!
//! - `Profile` - One purpose's persisted data plus session state
//! - `SigningRecord` - Domain signing key and its verification state
//! - `Snapshot` - Sanitized last-saved state used for dirty comparison

mod profile;
mod signing_record;
mod snapshot;

pub use profile::{Profile, ProfileData, RetrievalBlock, SessionState, TransportBlock};
pub use signing_record::SigningRecord;
pub use snapshot::{
    SanitizedProfile, SanitizedRetrieval, SanitizedSigningRecord, SanitizedTransport, Snapshot,
};
