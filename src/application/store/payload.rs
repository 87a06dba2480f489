//! Wire mapping for the store
//!
//! Inbound: server DTOs become editable profiles with every secret unedited
//! and retrieval enablement derived from which fields were present.
//! Outbound: profiles become the exact payload a save sends.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::entities::{
    Profile, ProfileData, RetrievalBlock, SessionState, SigningRecord, TransportBlock,
};
use crate::domain::ports::{ProfileDto, RetrievalDto, SigningRecordDto, TransportDto};
use crate::domain::services::Sanitize;
use crate::domain::value_objects::{Purpose, RetrievalSlot};

use super::save_plan::SavePayload;

/// Profile for `purpose` as the server described it.
pub(crate) fn profile_from_dto(purpose: Purpose, dto: &ProfileDto) -> Profile {
    let t = &dto.transport;
    let transport = TransportBlock::from_stored(
        t.host.clone(),
        t.port,
        t.username.clone(),
        t.from_address.clone(),
        t.use_tls,
        t.use_ssl,
    );
    let mut data = ProfileData::from_parts(
        dto.enabled,
        transport,
        block_from_dto(&dto.retrieval_primary),
        block_from_dto(&dto.retrieval_secondary),
    );
    if data.repair_retrieval() {
        warn!(%purpose, "both retrieval blocks arrived enabled; secondary disabled");
    }
    Profile::with_data(purpose, data)
}

fn block_from_dto(dto: &RetrievalDto) -> RetrievalBlock {
    RetrievalBlock {
        enabled: dto.indicates_enabled(),
        host: dto.host.clone().unwrap_or_default(),
        port: dto.port,
        username: dto.username.clone().unwrap_or_default(),
        use_secure_transport: dto.use_secure_transport,
    }
}

pub(crate) fn signing_record_from_dto(dto: &SigningRecordDto) -> SigningRecord {
    SigningRecord {
        domain: dto.domain.clone(),
        selector: dto.selector.clone(),
        public_key: dto.public_key.clone(),
        status: dto.status.persisted(),
        last_checked_at: dto.last_checked_at,
        last_result: dto.last_result.clone(),
    }
}

/// Outbound form of one profile. Secrets travel only when edited; a disabled
/// retrieval block is sent zeroed.
pub(crate) fn profile_to_dto(profile: &Profile) -> ProfileDto {
    let data = &profile.data;
    let session = &profile.session;
    let t = &data.transport;
    ProfileDto {
        enabled: data.enabled,
        transport: TransportDto {
            host: t.host.trim().to_string(),
            port: t.port,
            username: t.username.trim().to_string(),
            password: session.transport_password.outbound(),
            from_address: t.from_address.trim().to_string(),
            use_tls: t.use_tls(),
            use_ssl: t.use_ssl(),
        },
        retrieval_primary: block_to_dto(data, session, RetrievalSlot::Primary),
        retrieval_secondary: block_to_dto(data, session, RetrievalSlot::Secondary),
    }
}

fn block_to_dto(data: &ProfileData, session: &SessionState, slot: RetrievalSlot) -> RetrievalDto {
    let block = data.retrieval(slot);
    if !block.enabled {
        return RetrievalDto::default();
    }
    let text = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    RetrievalDto {
        host: text(&block.host),
        port: block.port,
        username: text(&block.username),
        password: session.retrieval_password(slot).outbound(),
        use_secure_transport: block.use_secure_transport,
    }
}

pub(crate) fn signing_record_to_dto(record: &SigningRecord) -> SigningRecordDto {
    let sanitized = record.sanitize();
    SigningRecordDto {
        domain: sanitized.domain,
        selector: sanitized.selector,
        public_key: sanitized.public_key,
        status: sanitized.status,
        last_checked_at: sanitized.last_checked_at,
        last_result: sanitized.last_result,
    }
}

pub(crate) fn build_payload(
    profiles: &BTreeMap<Purpose, Profile>,
    record: &SigningRecord,
) -> SavePayload {
    SavePayload {
        profiles: profiles
            .iter()
            .map(|(purpose, profile)| (*purpose, profile_to_dto(profile)))
            .collect(),
        signing_record: signing_record_to_dto(record),
    }
}

/// Whether the sent block will read back as enabled.
pub(crate) fn sent_as_enabled(dto: &ProfileDto, slot: RetrievalSlot) -> bool {
    match slot {
        RetrievalSlot::Primary => dto.retrieval_primary.indicates_enabled(),
        RetrievalSlot::Secondary => dto.retrieval_secondary.indicates_enabled(),
    }
}
