//! Sanitized, comparable forms and the last-saved snapshot
//!
//! Sanitized types carry no secrets and no session state. A disabled retrieval
//! block is `None`, the canonical empty block. Equality on these types is the
//! dirty-check.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::profile::{ProfileData, RetrievalBlock, TransportBlock};
use super::signing_record::SigningRecord;
use crate::domain::value_objects::{Purpose, RetrievalSlot, VerificationStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedTransport {
    pub host: String,
    pub port: Option<u32>,
    pub username: String,
    pub from_address: String,
    pub use_tls: bool,
    pub use_ssl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedRetrieval {
    pub host: String,
    pub port: Option<u32>,
    pub username: String,
    pub use_secure_transport: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedProfile {
    pub enabled: bool,
    pub transport: SanitizedTransport,
    pub retrieval_primary: Option<SanitizedRetrieval>,
    pub retrieval_secondary: Option<SanitizedRetrieval>,
}

impl SanitizedProfile {
    pub fn retrieval(&self, slot: RetrievalSlot) -> Option<&SanitizedRetrieval> {
        match slot {
            RetrievalSlot::Primary => self.retrieval_primary.as_ref(),
            RetrievalSlot::Secondary => self.retrieval_secondary.as_ref(),
        }
    }

    /// Rebuild editable data. Secrets are not part of the sanitized form, so
    /// the caller pairs this with a fresh session.
    pub fn to_data(&self) -> ProfileData {
        let transport = TransportBlock::from_stored(
            self.transport.host.clone(),
            self.transport.port,
            self.transport.username.clone(),
            self.transport.from_address.clone(),
            self.transport.use_tls,
            self.transport.use_ssl,
        );
        let block = |retrieval: Option<&SanitizedRetrieval>| match retrieval {
            Some(r) => RetrievalBlock {
                enabled: true,
                host: r.host.clone(),
                port: r.port,
                username: r.username.clone(),
                use_secure_transport: r.use_secure_transport,
            },
            None => RetrievalBlock::default(),
        };
        let mut data = ProfileData::from_parts(
            self.enabled,
            transport,
            block(self.retrieval_primary.as_ref()),
            block(self.retrieval_secondary.as_ref()),
        );
        data.repair_retrieval();
        data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedSigningRecord {
    pub domain: String,
    pub selector: String,
    pub public_key: String,
    pub status: VerificationStatus,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_result: Option<String>,
}

impl SanitizedSigningRecord {
    pub fn to_record(&self) -> SigningRecord {
        SigningRecord {
            domain: self.domain.clone(),
            selector: self.selector.clone(),
            public_key: self.public_key.clone(),
            status: self.status,
            last_checked_at: self.last_checked_at,
            last_result: self.last_result.clone(),
        }
    }
}

/// Redacted copy of all profiles plus the signing record, taken right after a
/// successful load or save. Never mutated by edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    profiles: BTreeMap<Purpose, SanitizedProfile>,
    signing_record: SanitizedSigningRecord,
}

impl Snapshot {
    pub fn new(
        profiles: BTreeMap<Purpose, SanitizedProfile>,
        signing_record: SanitizedSigningRecord,
    ) -> Self {
        Self {
            profiles,
            signing_record,
        }
    }

    pub fn profile(&self, purpose: Purpose) -> Option<&SanitizedProfile> {
        self.profiles.get(&purpose)
    }

    pub fn profiles(&self) -> impl Iterator<Item = (&Purpose, &SanitizedProfile)> {
        self.profiles.iter()
    }

    pub fn signing_record(&self) -> &SanitizedSigningRecord {
        &self.signing_record
    }
}
