//! Validation Domain Service
//!
//! Inspects one profile and reports every violation (no short-circuit, so a
//! form can mark all offending fields at once) plus per-block readiness.

use crate::domain::entities::{Profile, TransportBlock};
use crate::domain::value_objects::{FieldPath, RetrievalField, RetrievalSlot, TransportField};

pub const PORT_RANGE: std::ops::RangeInclusive<u32> = 1..=65535;

/// A single rule failure, tagged with the field to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Option<FieldPath>,
    pub message: String,
}

impl Violation {
    fn at(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    fn profile_wide(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Which blocks are complete enough to be tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Readiness {
    pub transport: bool,
    pub retrieval_primary: bool,
    pub retrieval_secondary: bool,
}

impl Readiness {
    pub fn retrieval(&self, slot: RetrievalSlot) -> bool {
        match slot {
            RetrievalSlot::Primary => self.retrieval_primary,
            RetrievalSlot::Secondary => self.retrieval_secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub readiness: Readiness,
}

impl ValidationReport {
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Whether a field has no violation attached
    pub fn field_ok(&self, field: FieldPath) -> bool {
        !self.violations.iter().any(|v| v.field == Some(field))
    }
}

/// Validate one profile against every rule.
pub fn validate_profile(profile: &Profile) -> ValidationReport {
    let mut violations = Vec::new();
    let transport = &profile.data.transport;

    if transport.host.trim().is_empty() {
        violations.push(Violation::at(
            FieldPath::Transport(TransportField::Host),
            "Transport host is required",
        ));
    }
    if !is_valid_port(transport.port) {
        violations.push(Violation::at(
            FieldPath::Transport(TransportField::Port),
            "Transport port must be between 1 and 65535",
        ));
    }
    if !is_valid_email(&transport.from_address) {
        violations.push(Violation::at(
            FieldPath::Transport(TransportField::FromAddress),
            "From address must be a valid email address",
        ));
    }
    if transport.use_tls() && transport.use_ssl() {
        violations.push(Violation::at(
            FieldPath::Transport(TransportField::UseSsl),
            "TLS and SSL cannot both be enabled",
        ));
    }

    let mut readiness = Readiness {
        transport: transport_ready(transport),
        ..Readiness::default()
    };

    for slot in RetrievalSlot::ALL {
        let block = profile.data.retrieval(slot);
        if !block.enabled {
            continue;
        }
        let before = violations.len();
        let label = slot.label();

        if block.host.trim().is_empty() {
            violations.push(Violation::at(
                FieldPath::Retrieval(slot, RetrievalField::Host),
                format!("{} host is required", label),
            ));
        }
        if !is_valid_port(block.port) {
            violations.push(Violation::at(
                FieldPath::Retrieval(slot, RetrievalField::Port),
                format!("{} port must be between 1 and 65535", label),
            ));
        }
        if block.username.trim().is_empty() {
            violations.push(Violation::at(
                FieldPath::Retrieval(slot, RetrievalField::Username),
                format!("{} username is required", label),
            ));
        }
        // Unedited means the server keeps the stored value.
        let password = profile.session.retrieval_password(slot);
        if password.is_cleared() {
            violations.push(Violation::at(
                FieldPath::Retrieval(slot, RetrievalField::Password),
                format!("{} password is required", label),
            ));
        }

        let ready = violations.len() == before;
        match slot {
            RetrievalSlot::Primary => readiness.retrieval_primary = ready,
            RetrievalSlot::Secondary => readiness.retrieval_secondary = ready,
        }
    }

    if profile.data.both_retrievals_enabled() {
        violations.push(Violation::profile_wide(
            "Only one retrieval mechanism may be active",
        ));
    }

    ValidationReport {
        violations,
        readiness,
    }
}

/// Narrow readiness check gating the "send test" action.
pub fn transport_ready(transport: &TransportBlock) -> bool {
    !transport.host.trim().is_empty()
        && is_valid_port(transport.port)
        && is_valid_email(&transport.from_address)
        && !(transport.use_tls() && transport.use_ssl())
}

pub fn is_valid_port(port: Option<u32>) -> bool {
    port.is_some_and(|p| PORT_RANGE.contains(&p))
}

/// Basic `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot
/// inside the domain part.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
