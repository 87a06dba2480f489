//! Domain signing record (DKIM-style key publication)
//!
//! A single record shared by all profiles, with its own verification state.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{SigningField, VerificationStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SigningRecord {
    pub domain: String,
    pub selector: String,
    pub public_key: String,
    pub status: VerificationStatus,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_result: Option<String>,
}

impl SigningRecord {
    /// DNS name the key is published under: `<selector>._domainkey.<domain>`
    pub fn dns_name(&self) -> Option<String> {
        let domain = self.domain.trim().trim_end_matches('.');
        let selector = self.selector.trim();
        if domain.is_empty() || selector.is_empty() {
            return None;
        }
        Some(format!("{}._domainkey.{}", selector, domain))
    }

    /// Both lookup fields are filled in
    pub fn has_lookup_fields(&self) -> bool {
        !self.domain.trim().is_empty() && !self.selector.trim().is_empty()
    }

    pub fn set_field(&mut self, field: SigningField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SigningField::Domain => self.domain = value,
            SigningField::Selector => self.selector = value,
            SigningField::PublicKey => self.public_key = value,
        }
    }
}
