//! Profile Store
//!
//! Owns every profile and the signing record, the last-saved snapshot, and
//! the busy flag that keeps load and save from overlapping. Remote round trips
//! are split into `begin_*`/`finish_*` so an embedder can run the network
//! call elsewhere; `load()` and `save()` compose both halves.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::domain::entities::{Profile, RetrievalBlock, SigningRecord, Snapshot};
use crate::domain::policies::{
    host_for_region, region_from_host, Preset, PresetCatalog, BULK_MAIL_PRESET,
};
use crate::domain::ports::{BackendError, Notice, NoticeSink, RemoteConfig, SettingsBackend};
use crate::domain::services::{
    diff_against, snapshot_of, transport_ready, validate_profile, DirtyReport, Sanitize,
    ValidationReport,
};
use crate::domain::value_objects::{
    FieldPath, FieldValue, Purpose, RetrievalField, RetrievalSlot, SecretField, SecurityFlag,
    SigningField, TestKind, TestOutcome, TransportField,
};
use crate::error::{MailconfError, MailconfResult};

use super::payload::{
    build_payload, profile_from_dto, profile_to_dto, sent_as_enabled, signing_record_from_dto,
};
use super::save_plan::{SaveFailure, SavePayload, SavePlan, SaveReport};

/// Remote operation currently holding the busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Load,
    Save,
}

impl StoreOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::Load => "load",
            StoreOperation::Save => "save",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that a load was started. Dropping it without finishing releases
/// the busy flag.
#[derive(Debug)]
pub struct LoadTicket {
    _lease: Arc<()>,
}

/// A save in flight, carrying exactly what will be sent. Dropping it without
/// finishing releases the busy flag.
#[derive(Debug)]
pub struct SaveTicket {
    payload: SavePayload,
    _lease: Arc<()>,
}

/// Busy flag tied to the lifetime of the outstanding ticket
struct BusyLease {
    operation: StoreOperation,
    lease: Weak<()>,
}

impl BusyLease {
    fn is_live(&self) -> bool {
        self.lease.strong_count() > 0
    }
}

impl SaveTicket {
    pub fn payload(&self) -> &SavePayload {
        &self.payload
    }
}

pub struct ProfileStore {
    backend: Arc<dyn SettingsBackend>,
    notices: Arc<dyn NoticeSink>,
    catalog: PresetCatalog,
    plan: SavePlan,
    generic_failure: String,
    profiles: BTreeMap<Purpose, Profile>,
    signing_record: SigningRecord,
    snapshot: Snapshot,
    last_updated: Option<DateTime<Utc>>,
    busy: Option<BusyLease>,
}

impl ProfileStore {
    pub fn new(
        backend: Arc<dyn SettingsBackend>,
        notices: Arc<dyn NoticeSink>,
        config: &ControllerConfig,
    ) -> Self {
        let profiles = empty_profiles();
        let signing_record = SigningRecord::default();
        let snapshot = snapshot_of(&profiles, &signing_record);
        Self {
            backend,
            notices,
            catalog: config.preset_catalog(),
            plan: SavePlan::standard(config.save.signing_record_fallback),
            generic_failure: config.messages.generic_failure.clone(),
            profiles,
            signing_record,
            snapshot,
            last_updated: None,
            busy: None,
        }
    }

    pub fn with_save_plan(mut self, plan: SavePlan) -> Self {
        self.plan = plan;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn profile(&self, purpose: Purpose) -> Option<&Profile> {
        self.profiles.get(&purpose)
    }

    pub fn profiles(&self) -> &BTreeMap<Purpose, Profile> {
        &self.profiles
    }

    pub fn signing_record(&self) -> &SigningRecord {
        &self.signing_record
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// `lastUpdated` from the most recent load
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// The operation holding the busy flag, if its ticket is still alive
    pub fn busy(&self) -> Option<StoreOperation> {
        self.busy
            .as_ref()
            .filter(|busy| busy.is_live())
            .map(|busy| busy.operation)
    }

    pub fn is_busy(&self) -> bool {
        self.busy().is_some()
    }

    pub(crate) fn generic_failure(&self) -> &str {
        &self.generic_failure
    }

    pub(crate) fn signing_record_mut(&mut self) -> &mut SigningRecord {
        &mut self.signing_record
    }

    fn profile_mut(&mut self, purpose: Purpose) -> &mut Profile {
        self.profiles
            .entry(purpose)
            .or_insert_with(|| Profile::empty(purpose))
    }

    fn acquire(&mut self, requested: StoreOperation) -> MailconfResult<Arc<()>> {
        if let Some(busy) = &self.busy {
            if busy.is_live() {
                return Err(MailconfError::Busy {
                    requested: requested.as_str(),
                    running: busy.operation.as_str(),
                });
            }
            warn!(operation = %busy.operation, "previous ticket dropped without finishing");
        }
        let lease = Arc::new(());
        self.busy = Some(BusyLease {
            operation: requested,
            lease: Arc::downgrade(&lease),
        });
        Ok(lease)
    }

    /// Give up on an outstanding round trip: the busy flag is released and the
    /// caller is told the operation failed.
    fn abandon(&mut self, operation: StoreOperation) -> MailconfError {
        self.busy = None;
        warn!(%operation, "operation abandoned");
        let text = self.generic_failure.clone();
        self.notices.notify(Notice::error(text.clone()));
        MailconfError::Remote {
            operation: operation.as_str(),
            message: text,
        }
    }

    fn failure_text<'a>(&'a self, error: Option<&'a str>) -> &'a str {
        error.unwrap_or(&self.generic_failure)
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    pub fn begin_load(&mut self) -> MailconfResult<LoadTicket> {
        let lease = self.acquire(StoreOperation::Load)?;
        debug!("loading email settings");
        Ok(LoadTicket { _lease: lease })
    }

    /// Release a load whose response will never arrive (timeout, cancelled
    /// worker). State is left as it was.
    pub fn abandon_load(&mut self, ticket: LoadTicket) -> MailconfError {
        drop(ticket);
        self.abandon(StoreOperation::Load)
    }

    /// Replace all state with the server's view. On failure nothing changes.
    pub fn finish_load(
        &mut self,
        _ticket: LoadTicket,
        response: Result<RemoteConfig, BackendError>,
    ) -> MailconfResult<()> {
        self.busy = None;

        let remote = match response {
            Ok(remote) => remote,
            Err(error) => {
                warn!(%error, "loading email settings failed");
                let text = self.failure_text(error.service_message()).to_string();
                self.notices.notify(Notice::error(text.clone()));
                return Err(MailconfError::Remote {
                    operation: "load",
                    message: text,
                });
            }
        };

        self.profiles = Purpose::ALL
            .into_iter()
            .map(|purpose| {
                let profile = match remote.profiles.get(&purpose) {
                    Some(dto) => profile_from_dto(purpose, dto),
                    None => Profile::empty(purpose),
                };
                (purpose, profile)
            })
            .collect();
        self.signing_record = remote
            .signing_record
            .as_ref()
            .map(signing_record_from_dto)
            .unwrap_or_default();
        self.last_updated = remote.last_updated;
        self.snapshot = snapshot_of(&self.profiles, &self.signing_record);

        info!(profiles = remote.profiles.len(), "email settings loaded");
        Ok(())
    }

    pub fn load(&mut self) -> MailconfResult<()> {
        let ticket = self.begin_load()?;
        let response = self.backend.get_config();
        self.finish_load(ticket, response)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Write one field. Any retrieval field enables its block, which in turn
    /// disables the other block.
    pub fn set_field(
        &mut self,
        purpose: Purpose,
        path: FieldPath,
        value: impl Into<FieldValue>,
    ) -> MailconfResult<()> {
        let value = value.into();
        let profile = self.profile_mut(purpose);

        match path {
            FieldPath::Enabled => profile.data.enabled = value.as_flag(&path)?,
            FieldPath::Transport(field) => {
                let transport = &mut profile.data.transport;
                match field {
                    TransportField::Host => transport.host = value.as_text(&path)?,
                    TransportField::Port => transport.port = value.as_port(&path)?,
                    TransportField::Username => transport.username = value.as_text(&path)?,
                    TransportField::FromAddress => {
                        transport.from_address = value.as_text(&path)?
                    }
                    TransportField::Password => {
                        profile.session.transport_password =
                            SecretField::edited(value.as_text(&path)?)
                    }
                    TransportField::UseTls => {
                        transport.set_security(SecurityFlag::Tls, value.as_flag(&path)?)
                    }
                    TransportField::UseSsl => {
                        transport.set_security(SecurityFlag::Ssl, value.as_flag(&path)?)
                    }
                }
            }
            FieldPath::Retrieval(slot, field) => {
                match field {
                    RetrievalField::Host => {
                        profile.data.retrieval_mut(slot).host = value.as_text(&path)?
                    }
                    RetrievalField::Port => {
                        profile.data.retrieval_mut(slot).port = value.as_port(&path)?
                    }
                    RetrievalField::Username => {
                        profile.data.retrieval_mut(slot).username = value.as_text(&path)?
                    }
                    RetrievalField::Password => {
                        *profile.session.retrieval_password_mut(slot) =
                            SecretField::edited(value.as_text(&path)?)
                    }
                    RetrievalField::UseSecureTransport => {
                        profile.data.retrieval_mut(slot).use_secure_transport =
                            value.as_flag(&path)?
                    }
                }
                profile.data.set_retrieval_enabled(slot, true);
            }
        }

        debug!(%purpose, field = %path, "field updated");
        Ok(())
    }

    /// `set_field` addressed by a dotted UI field name.
    pub fn set_field_by_name(
        &mut self,
        purpose: Purpose,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> MailconfResult<()> {
        let path: FieldPath = path.parse()?;
        self.set_field(purpose, path, value)
    }

    pub fn set_security_flag(&mut self, purpose: Purpose, which: SecurityFlag, checked: bool) {
        self.profile_mut(purpose)
            .data
            .transport
            .set_security(which, checked);
    }

    pub fn set_retrieval_enabled(&mut self, purpose: Purpose, slot: RetrievalSlot, enabled: bool) {
        self.profile_mut(purpose)
            .data
            .set_retrieval_enabled(slot, enabled);
    }

    /// Overwrite host, port and security from a catalog entry. The bulk-mail
    /// preset keeps the region already in the host, if any.
    pub fn apply_preset(&mut self, purpose: Purpose, key: &str) -> MailconfResult<()> {
        let preset = self
            .catalog
            .get(key)
            .cloned()
            .ok_or_else(|| MailconfError::UnknownPreset {
                key: key.to_string(),
            })?;
        let default_region = self.catalog.bulk_mail_region().to_string();

        let transport = &mut self.profile_mut(purpose).data.transport;
        let region = region_from_host(&transport.host)
            .map(str::to_string)
            .unwrap_or(default_region);
        preset.apply(transport, &region);

        debug!(%purpose, preset = %preset.key, "preset applied");
        Ok(())
    }

    /// Rewrite the host for the bulk-mail provider's region.
    pub fn set_bulk_mail_region(&mut self, purpose: Purpose, region: &str) -> MailconfResult<()> {
        let preset = self
            .catalog
            .get(BULK_MAIL_PRESET)
            .cloned()
            .ok_or_else(|| MailconfError::UnknownPreset {
                key: BULK_MAIL_PRESET.to_string(),
            })?;
        let transport = &mut self.profile_mut(purpose).data.transport;
        transport.host = host_for_region(region);
        if transport.port.is_none() {
            transport.port = Some(preset.port);
        }
        Ok(())
    }

    pub fn detect_preset(&self, purpose: Purpose) -> Option<&Preset> {
        self.profile(purpose)
            .and_then(|profile| self.catalog.detect(&profile.data.transport))
    }

    /// Copy transport and retrieval configuration from `src` to `dest`.
    /// A disabled source block arrives as the empty block, so leftovers never
    /// travel. Secrets and test outcomes on `dest` are cleared; which retrieval
    /// block is enabled is recomputed from the copied non-secret fields.
    pub fn copy_between(&mut self, dest: Purpose, src: Purpose) {
        if dest == src {
            return;
        }
        let source = self
            .profile(src)
            .map(|p| p.data.clone())
            .unwrap_or_default();

        let target = self.profile_mut(dest);
        target.data.transport = source.transport.clone();
        for slot in RetrievalSlot::ALL {
            let block = source.retrieval(slot);
            *target.data.retrieval_mut(slot) = if block.enabled {
                block.clone()
            } else {
                RetrievalBlock::default()
            };
        }
        for slot in RetrievalSlot::ALL {
            let has_content = target.data.retrieval(slot).has_content();
            target.data.retrieval_mut(slot).enabled = has_content;
        }
        target.data.repair_retrieval();
        target.session.clear_secrets();
        target.session.test_outcomes.clear();

        info!(%dest, %src, "profile copied");
    }

    pub fn set_signing_field(&mut self, field: SigningField, value: impl Into<String>) {
        self.signing_record.set_field(field, value);
    }

    pub(crate) fn record_test_outcome(
        &mut self,
        purpose: Purpose,
        kind: TestKind,
        outcome: TestOutcome,
    ) {
        self.profile_mut(purpose)
            .session
            .test_outcomes
            .insert(kind, outcome);
    }

    // ------------------------------------------------------------------
    // Dirty tracking and validation
    // ------------------------------------------------------------------

    pub fn dirty_report(&self) -> DirtyReport {
        diff_against(&self.snapshot, &self.profiles, &self.signing_record)
    }

    pub fn compute_dirty(&self) -> bool {
        self.dirty_report().is_dirty()
    }

    pub fn dirty_purposes(&self) -> Vec<Purpose> {
        self.dirty_report().purposes
    }

    pub fn validate(&self, purpose: Purpose) -> ValidationReport {
        match self.profile(purpose) {
            Some(profile) => validate_profile(profile),
            None => validate_profile(&Profile::empty(purpose)),
        }
    }

    pub fn transport_ready(&self, purpose: Purpose) -> bool {
        self.profile(purpose)
            .is_some_and(|profile| transport_ready(&profile.data.transport))
    }

    /// Dirty, not busy, and every changed profile passes validation.
    pub fn can_save(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        let report = self.dirty_report();
        report.is_dirty() && report.purposes.iter().all(|p| self.validate(*p).ok())
    }

    // ------------------------------------------------------------------
    // Save / revert / defaults
    // ------------------------------------------------------------------

    pub fn begin_save(&mut self) -> MailconfResult<SaveTicket> {
        let lease = self.acquire(StoreOperation::Save)?;
        let payload = build_payload(&self.profiles, &self.signing_record);
        debug!(profiles = payload.profiles.len(), "saving email settings");
        Ok(SaveTicket {
            payload,
            _lease: lease,
        })
    }

    /// Release a save whose outcome will never arrive. In-memory state and
    /// the snapshot are left as they were.
    pub fn abandon_save(&mut self, ticket: SaveTicket) -> MailconfError {
        drop(ticket);
        self.abandon(StoreOperation::Save)
    }

    /// On success the snapshot becomes what was sent, retrieval enablement is
    /// re-derived from it and every secret returns to unedited. A profile
    /// edited after `begin_save` keeps its edits and shows as dirty against
    /// the new snapshot. On failure in-memory state is left as it was.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        outcome: Result<SaveReport, SaveFailure>,
    ) -> MailconfResult<SaveReport> {
        self.busy = None;

        let report = match outcome {
            Ok(report) => report,
            Err(failure) => {
                let text = self.failure_text(failure.last_service_message()).to_string();
                self.notices.notify(Notice::error(text));
                return Err(failure.into_error());
            }
        };

        let SaveTicket { payload, .. } = ticket;
        let sanitized = payload
            .profiles
            .iter()
            .map(|(purpose, dto)| (*purpose, dto.sanitize()))
            .collect();
        self.snapshot = Snapshot::new(sanitized, payload.signing_record.sanitize());

        for (purpose, dto) in &payload.profiles {
            let profile = self.profile_mut(*purpose);
            if profile_to_dto(profile) != *dto {
                debug!(%purpose, "edited while saving; keeping edits");
                continue;
            }
            for slot in RetrievalSlot::ALL {
                profile.data.retrieval_mut(slot).enabled = sent_as_enabled(dto, slot);
            }
            profile.data.repair_retrieval();
            profile.session.clear_secrets();
        }

        if !report.signing_record_saved {
            debug!("signing record not persisted by this backend");
        }
        info!(strategy = report.strategy, "email settings saved");
        self.notices.notify(Notice::success("Email settings saved"));
        Ok(report)
    }

    pub fn save(&mut self) -> MailconfResult<SaveReport> {
        let ticket = self.begin_save()?;
        let outcome = self.plan.execute(self.backend.as_ref(), ticket.payload());
        self.finish_save(ticket, outcome)
    }

    /// Discard edits and rebuild from the snapshot with fresh session state.
    pub fn revert(&mut self) {
        self.profiles = Purpose::ALL
            .into_iter()
            .map(|purpose| {
                let profile = match self.snapshot.profile(purpose) {
                    Some(saved) => Profile::with_data(purpose, saved.to_data()),
                    None => Profile::empty(purpose),
                };
                (purpose, profile)
            })
            .collect();
        self.signing_record = self.snapshot.signing_record().to_record();
        debug!("edits reverted");
    }

    /// Reset to empty templates locally. The snapshot is kept, so this shows
    /// up as unsaved changes.
    pub fn restore_defaults(&mut self) {
        self.profiles = empty_profiles();
        self.signing_record = SigningRecord::default();
        debug!("defaults restored");
    }
}

fn empty_profiles() -> BTreeMap<Purpose, Profile> {
    Purpose::ALL
        .into_iter()
        .map(|purpose| (purpose, Profile::empty(purpose)))
        .collect()
}
