//! Domain-Key Verification Coordinator
//!
//! Drives the signing record through `unknown -> checking -> valid|invalid`.
//! A failed call is "could not determine" and returns the record to
//! `unknown`, never to `invalid`. A `checking` status left behind by a dropped
//! ticket does not block the next check.

use std::sync::{Arc, Weak};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BackendError, DomainKeyCheckRequest, DomainKeyCheckResponse, DomainKeyService, Notice,
    NoticeSink,
};
use crate::domain::value_objects::VerificationStatus;
use crate::error::{MailconfError, MailconfResult};

use super::store::ProfileStore;

/// A check that has set the record to `checking`
#[derive(Debug)]
pub struct CheckTicket {
    request: DomainKeyCheckRequest,
    _lease: Arc<()>,
}

impl CheckTicket {
    pub fn request(&self) -> &DomainKeyCheckRequest {
        &self.request
    }
}

pub struct DomainKeyCoordinator {
    service: Arc<dyn DomainKeyService>,
    notices: Arc<dyn NoticeSink>,
    lease: Weak<()>,
}

impl DomainKeyCoordinator {
    pub fn new(service: Arc<dyn DomainKeyService>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            service,
            notices,
            lease: Weak::new(),
        }
    }

    /// Whether a check ticket from this coordinator is still outstanding
    pub fn is_checking(&self) -> bool {
        self.lease.strong_count() > 0
    }

    /// Validate locally, copy the lookup fields onto the record and mark it
    /// `checking`. Blank input leaves the record untouched.
    pub fn begin_check(
        &mut self,
        store: &mut ProfileStore,
        domain: &str,
        selector: &str,
    ) -> MailconfResult<CheckTicket> {
        if store.signing_record().status.is_checking() {
            if self.is_checking() {
                return Err(MailconfError::CheckInFlight);
            }
            warn!("previous domain key check was dropped without finishing");
        }
        let (domain_trimmed, selector_trimmed) = (domain.trim(), selector.trim());
        if domain_trimmed.is_empty() || selector_trimmed.is_empty() {
            return Err(MailconfError::DomainKeyFieldsRequired);
        }

        let record = store.signing_record_mut();
        if record.domain.trim() != domain_trimmed {
            record.domain = domain.to_string();
        }
        if record.selector.trim() != selector_trimmed {
            record.selector = selector.to_string();
        }
        record.status = VerificationStatus::Checking;

        debug!(domain = domain_trimmed, selector = selector_trimmed, "domain key check started");
        let lease = Arc::new(());
        self.lease = Arc::downgrade(&lease);
        Ok(CheckTicket {
            request: DomainKeyCheckRequest {
                domain: domain_trimmed.to_string(),
                selector: selector_trimmed.to_string(),
            },
            _lease: lease,
        })
    }

    pub fn dispatch(&self, ticket: &CheckTicket) -> Result<DomainKeyCheckResponse, BackendError> {
        self.service.check_domain_key(&ticket.request)
    }

    /// Resolve `checking` from the service's answer.
    pub fn complete(
        &self,
        store: &mut ProfileStore,
        ticket: CheckTicket,
        response: Result<DomainKeyCheckResponse, BackendError>,
    ) -> VerificationStatus {
        let generic = store.generic_failure().to_string();
        let record = store.signing_record_mut();

        let status = match response {
            Ok(response) => {
                let status = resolve_status(&response);
                record.last_checked_at = Some(response.checked_at.unwrap_or_else(Utc::now));
                record.last_result = non_blank(response.record).or(non_blank(response.message));
                status
            }
            Err(error) => {
                warn!(domain = %ticket.request.domain, %error, "domain key check failed");
                record.last_result = Some(error.service_message().unwrap_or(generic.as_str()).to_string());
                VerificationStatus::Unknown
            }
        };
        record.status = status;

        info!(domain = %ticket.request.domain, %status, "domain key check finished");
        let notice = match status {
            VerificationStatus::Valid => Notice::success("Signing key verified"),
            VerificationStatus::Invalid => Notice::error(
                record
                    .last_result
                    .clone()
                    .unwrap_or_else(|| "Signing key record is missing or invalid".to_string()),
            ),
            _ => Notice::info(record.last_result.clone().unwrap_or(generic)),
        };
        self.notices.notify(notice);
        status
    }

    /// Give up on a check whose response will never arrive. The record
    /// returns to `unknown`.
    pub fn abandon(&self, store: &mut ProfileStore, ticket: CheckTicket) -> VerificationStatus {
        warn!(domain = %ticket.request.domain, "domain key check abandoned");
        self.complete(store, ticket, Err(BackendError::unavailable(String::new())))
    }

    /// `begin_check`, `dispatch` and `complete` in one call.
    pub fn check_now(
        &mut self,
        store: &mut ProfileStore,
        domain: &str,
        selector: &str,
    ) -> MailconfResult<VerificationStatus> {
        let ticket = self.begin_check(store, domain, selector)?;
        let response = self.dispatch(&ticket);
        Ok(self.complete(store, ticket, response))
    }
}

/// Reported status wins; without one, `ok` decides. Unrecognized text means
/// the outcome could not be determined.
fn resolve_status(response: &DomainKeyCheckResponse) -> VerificationStatus {
    match response.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(reported) => VerificationStatus::from_report(reported)
            .map(VerificationStatus::persisted)
            .unwrap_or(VerificationStatus::Unknown),
        None if response.ok => VerificationStatus::Valid,
        None => VerificationStatus::Invalid,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
