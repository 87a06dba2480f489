//! Sanitizer Domain Service
//!
//! Produces the canonical comparable form of profiles and the signing record:
//! secrets and session state removed, strings trimmed, blank ports absent,
//! disabled retrieval blocks collapsed to `None`. Dirty-checking is plain
//! structural equality over these forms.

use std::collections::BTreeMap;

use crate::domain::entities::{
    Profile, ProfileData, RetrievalBlock, SanitizedProfile, SanitizedRetrieval,
    SanitizedSigningRecord, SanitizedTransport, SigningRecord, Snapshot,
};
use crate::domain::ports::{ProfileDto, RetrievalDto, SigningRecordDto};
use crate::domain::value_objects::{Purpose, RetrievalSlot};

/// Types that have a canonical comparable form
pub trait Sanitize {
    type Output;

    fn sanitize(&self) -> Self::Output;
}

impl Sanitize for ProfileData {
    type Output = SanitizedProfile;

    fn sanitize(&self) -> SanitizedProfile {
        let t = &self.transport;
        SanitizedProfile {
            enabled: self.enabled,
            transport: SanitizedTransport {
                host: trimmed(&t.host),
                port: t.port,
                username: trimmed(&t.username),
                from_address: trimmed(&t.from_address),
                use_tls: t.use_tls(),
                use_ssl: t.use_ssl(),
            },
            retrieval_primary: sanitize_block(self.retrieval(RetrievalSlot::Primary)),
            retrieval_secondary: sanitize_block(self.retrieval(RetrievalSlot::Secondary)),
        }
    }
}

impl Sanitize for Profile {
    type Output = SanitizedProfile;

    fn sanitize(&self) -> SanitizedProfile {
        self.data.sanitize()
    }
}

impl Sanitize for SanitizedProfile {
    type Output = SanitizedProfile;

    fn sanitize(&self) -> SanitizedProfile {
        self.to_data().sanitize()
    }
}

/// Sanitize a profile exactly as it was sent on the wire. Retrieval blocks
/// count as enabled when they carry any value, mirroring how a load reads them.
impl Sanitize for ProfileDto {
    type Output = SanitizedProfile;

    fn sanitize(&self) -> SanitizedProfile {
        let t = &self.transport;
        SanitizedProfile {
            enabled: self.enabled,
            transport: SanitizedTransport {
                host: trimmed(&t.host),
                port: t.port,
                username: trimmed(&t.username),
                from_address: trimmed(&t.from_address),
                use_tls: t.use_tls,
                use_ssl: t.use_ssl,
            },
            retrieval_primary: sanitize_dto_block(&self.retrieval_primary),
            retrieval_secondary: sanitize_dto_block(&self.retrieval_secondary),
        }
        .sanitize()
    }
}

impl Sanitize for SigningRecord {
    type Output = SanitizedSigningRecord;

    fn sanitize(&self) -> SanitizedSigningRecord {
        SanitizedSigningRecord {
            domain: trimmed(&self.domain),
            selector: trimmed(&self.selector),
            public_key: trimmed(&self.public_key),
            status: self.status.persisted(),
            last_checked_at: self.last_checked_at,
            last_result: self
                .last_result
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

impl Sanitize for SanitizedSigningRecord {
    type Output = SanitizedSigningRecord;

    fn sanitize(&self) -> SanitizedSigningRecord {
        self.to_record().sanitize()
    }
}

impl Sanitize for SigningRecordDto {
    type Output = SanitizedSigningRecord;

    fn sanitize(&self) -> SanitizedSigningRecord {
        SigningRecord {
            domain: self.domain.clone(),
            selector: self.selector.clone(),
            public_key: self.public_key.clone(),
            status: self.status,
            last_checked_at: self.last_checked_at,
            last_result: self.last_result.clone(),
        }
        .sanitize()
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn sanitize_block(block: &RetrievalBlock) -> Option<SanitizedRetrieval> {
    block.enabled.then(|| SanitizedRetrieval {
        host: trimmed(&block.host),
        port: block.port,
        username: trimmed(&block.username),
        use_secure_transport: block.use_secure_transport,
    })
}

fn sanitize_dto_block(dto: &RetrievalDto) -> Option<SanitizedRetrieval> {
    dto.indicates_enabled().then(|| SanitizedRetrieval {
        host: dto.host.as_deref().map(trimmed).unwrap_or_default(),
        port: dto.port,
        username: dto.username.as_deref().map(trimmed).unwrap_or_default(),
        use_secure_transport: dto.use_secure_transport,
    })
}

/// Take a snapshot of in-memory state.
pub fn snapshot_of(profiles: &BTreeMap<Purpose, Profile>, record: &SigningRecord) -> Snapshot {
    Snapshot::new(
        profiles
            .iter()
            .map(|(purpose, profile)| (*purpose, profile.sanitize()))
            .collect(),
        record.sanitize(),
    )
}

/// Where current state differs from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirtyReport {
    pub purposes: Vec<Purpose>,
    pub signing_record: bool,
}

impl DirtyReport {
    pub fn is_dirty(&self) -> bool {
        !self.purposes.is_empty() || self.signing_record
    }
}

/// Compare sanitized current state with a snapshot. A purpose missing from
/// either side counts as a difference.
pub fn diff_against(
    snapshot: &Snapshot,
    profiles: &BTreeMap<Purpose, Profile>,
    record: &SigningRecord,
) -> DirtyReport {
    let mut purposes: Vec<Purpose> = profiles
        .iter()
        .filter(|(purpose, profile)| snapshot.profile(**purpose) != Some(&profile.sanitize()))
        .map(|(purpose, _)| *purpose)
        .collect();
    for (purpose, _) in snapshot.profiles() {
        if !profiles.contains_key(purpose) {
            purposes.push(*purpose);
        }
    }
    purposes.sort();
    purposes.dedup();

    DirtyReport {
        purposes,
        signing_record: snapshot.signing_record() != &record.sanitize(),
    }
}
