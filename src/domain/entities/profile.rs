//! Profile entity - one purpose's transport and retrieval configuration
//!
//! Persisted configuration (`ProfileData`) is kept apart from per-session UI
//! state (`SessionState`: typed secrets and cached test outcomes), so the
//! sanitizer can drop the session half wholesale.

use std::collections::BTreeMap;

use crate::domain::value_objects::{
    Purpose, RetrievalSlot, SecretField, SecurityFlag, TestKind, TestOutcome,
};

/// Outbound transport block (secret lives in `SessionState`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportBlock {
    pub host: String,
    pub port: Option<u32>,
    pub username: String,
    pub from_address: String,
    use_tls: bool,
    use_ssl: bool,
}

impl TransportBlock {
    /// Build from stored values without enforcing TLS/SSL exclusivity, so a
    /// conflicting server payload stays visible to validation.
    pub(crate) fn from_stored(
        host: String,
        port: Option<u32>,
        username: String,
        from_address: String,
        use_tls: bool,
        use_ssl: bool,
    ) -> Self {
        Self {
            host,
            port,
            username,
            from_address,
            use_tls,
            use_ssl,
        }
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Set one security flag; turning one on clears the other.
    pub fn set_security(&mut self, flag: SecurityFlag, checked: bool) {
        match flag {
            SecurityFlag::Tls => {
                self.use_tls = checked;
                if checked {
                    self.use_ssl = false;
                }
            }
            SecurityFlag::Ssl => {
                self.use_ssl = checked;
                if checked {
                    self.use_tls = false;
                }
            }
        }
    }

    /// Replace both flags at once, keeping at most one set (SSL wins a tie).
    pub fn set_security_mode(&mut self, use_tls: bool, use_ssl: bool) {
        self.use_ssl = use_ssl;
        self.use_tls = use_tls && !use_ssl;
    }
}

/// One inbound retrieval block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalBlock {
    pub enabled: bool,
    pub host: String,
    pub port: Option<u32>,
    pub username: String,
    pub use_secure_transport: bool,
}

impl RetrievalBlock {
    pub const DEFAULT_SECURE_TRANSPORT: bool = true;

    /// Whether any non-secret field carries a value
    pub fn has_content(&self) -> bool {
        !self.host.trim().is_empty() || self.port.is_some() || !self.username.trim().is_empty()
    }
}

impl Default for RetrievalBlock {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: None,
            username: String::new(),
            use_secure_transport: Self::DEFAULT_SECURE_TRANSPORT,
        }
    }
}

/// Persisted configuration of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileData {
    /// When false the purpose queues mail instead of sending it
    pub enabled: bool,
    pub transport: TransportBlock,
    primary: RetrievalBlock,
    secondary: RetrievalBlock,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            enabled: true,
            transport: TransportBlock::default(),
            primary: RetrievalBlock::default(),
            secondary: RetrievalBlock::default(),
        }
    }
}

impl ProfileData {
    /// Assemble from stored blocks. Both retrieval blocks may arrive enabled;
    /// callers repair that with [`ProfileData::repair_retrieval`].
    pub(crate) fn from_parts(
        enabled: bool,
        transport: TransportBlock,
        primary: RetrievalBlock,
        secondary: RetrievalBlock,
    ) -> Self {
        Self {
            enabled,
            transport,
            primary,
            secondary,
        }
    }

    pub fn retrieval(&self, slot: RetrievalSlot) -> &RetrievalBlock {
        match slot {
            RetrievalSlot::Primary => &self.primary,
            RetrievalSlot::Secondary => &self.secondary,
        }
    }

    /// Mutable access for field edits. Flipping `enabled` through this
    /// reference bypasses exclusivity; use [`ProfileData::set_retrieval_enabled`].
    pub(crate) fn retrieval_mut(&mut self, slot: RetrievalSlot) -> &mut RetrievalBlock {
        match slot {
            RetrievalSlot::Primary => &mut self.primary,
            RetrievalSlot::Secondary => &mut self.secondary,
        }
    }

    /// Enable or disable one retrieval block; enabling disables the other.
    pub fn set_retrieval_enabled(&mut self, slot: RetrievalSlot, enabled: bool) {
        self.retrieval_mut(slot).enabled = enabled;
        if enabled {
            self.retrieval_mut(slot.other()).enabled = false;
        }
    }

    /// The enabled retrieval block, if any (primary wins if both are set).
    pub fn active_retrieval(&self) -> Option<RetrievalSlot> {
        RetrievalSlot::ALL
            .into_iter()
            .find(|slot| self.retrieval(*slot).enabled)
    }

    pub fn both_retrievals_enabled(&self) -> bool {
        self.primary.enabled && self.secondary.enabled
    }

    /// Force the secondary block off when both are enabled.
    /// Returns true when a repair happened.
    pub fn repair_retrieval(&mut self) -> bool {
        if self.both_retrievals_enabled() {
            self.secondary.enabled = false;
            true
        } else {
            false
        }
    }
}

/// Per-session state that is never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub transport_password: SecretField,
    primary_password: SecretField,
    secondary_password: SecretField,
    pub test_outcomes: BTreeMap<TestKind, TestOutcome>,
}

impl SessionState {
    pub fn retrieval_password(&self, slot: RetrievalSlot) -> &SecretField {
        match slot {
            RetrievalSlot::Primary => &self.primary_password,
            RetrievalSlot::Secondary => &self.secondary_password,
        }
    }

    pub fn retrieval_password_mut(&mut self, slot: RetrievalSlot) -> &mut SecretField {
        match slot {
            RetrievalSlot::Primary => &mut self.primary_password,
            RetrievalSlot::Secondary => &mut self.secondary_password,
        }
    }

    pub fn any_secret_edited(&self) -> bool {
        self.transport_password.is_edited()
            || self.primary_password.is_edited()
            || self.secondary_password.is_edited()
    }

    /// Blank every secret and reset its edit-flag.
    pub fn clear_secrets(&mut self) {
        self.transport_password = SecretField::Unchanged;
        self.primary_password = SecretField::Unchanged;
        self.secondary_password = SecretField::Unchanged;
    }
}

/// An email profile: persisted data plus session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    purpose: Purpose,
    pub data: ProfileData,
    pub session: SessionState,
}

impl Profile {
    /// Empty template for a purpose
    pub fn empty(purpose: Purpose) -> Self {
        Self::with_data(purpose, ProfileData::default())
    }

    pub fn with_data(purpose: Purpose, data: ProfileData) -> Self {
        Self {
            purpose,
            data,
            session: SessionState::default(),
        }
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn test_outcome(&self, kind: TestKind) -> Option<&TestOutcome> {
        self.session.test_outcomes.get(&kind)
    }
}
