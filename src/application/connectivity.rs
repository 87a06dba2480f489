//! Connectivity Test Coordinator
//!
//! Issues transport, retrieval and send-message tests against the external
//! test service and caches each outcome on the owning profile. At most one
//! test per `(kind, purpose)` may be pending; a second request for the same
//! key is rejected while tests for other keys may run alongside it. A slot is
//! held only while its ticket lives, so a dropped ticket frees it.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use tracing::{debug, info, warn};

use crate::config::TestMessageConfig;
use crate::domain::ports::{
    BackendError, ConnectivityService, ConnectivityTestRequest, Notice, NoticeSink,
    TestMessageRequest, TestResponse,
};
use crate::domain::services::is_valid_email;
use crate::domain::value_objects::{Purpose, TestKind, TestOutcome};
use crate::error::{MailconfError, MailconfResult};

use super::store::ProfileStore;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TestRequest {
    Connectivity(ConnectivityTestRequest),
    Message(TestMessageRequest),
}

/// A test that has been admitted and not yet completed
#[derive(Debug)]
pub struct TestTicket {
    kind: TestKind,
    purpose: Purpose,
    request: TestRequest,
    _lease: Arc<()>,
}

impl TestTicket {
    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }
}

pub struct ConnectivityTestCoordinator {
    service: Arc<dyn ConnectivityService>,
    notices: Arc<dyn NoticeSink>,
    test_message: TestMessageConfig,
    in_flight: BTreeMap<(TestKind, Purpose), Weak<()>>,
}

impl ConnectivityTestCoordinator {
    pub fn new(
        service: Arc<dyn ConnectivityService>,
        notices: Arc<dyn NoticeSink>,
        test_message: TestMessageConfig,
    ) -> Self {
        Self {
            service,
            notices,
            test_message,
            in_flight: BTreeMap::new(),
        }
    }

    pub fn is_in_flight(&self, kind: TestKind, purpose: Purpose) -> bool {
        self.in_flight
            .get(&(kind, purpose))
            .is_some_and(|lease| lease.strong_count() > 0)
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &(TestKind, Purpose)> {
        self.in_flight
            .iter()
            .filter(|(_, lease)| lease.strong_count() > 0)
            .map(|(key, _)| key)
    }

    /// Admit a test. Local checks happen here, before any network call.
    pub fn begin(
        &mut self,
        kind: TestKind,
        purpose: Purpose,
        recipient: Option<&str>,
    ) -> MailconfResult<TestTicket> {
        if self.is_in_flight(kind, purpose) {
            return Err(MailconfError::TestInFlight { kind, purpose });
        }

        let request = match kind {
            TestKind::SendMessage => {
                let recipient = recipient
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(MailconfError::RecipientRequired)?;
                if !is_valid_email(recipient) {
                    return Err(MailconfError::InvalidRecipient {
                        recipient: recipient.to_string(),
                    });
                }
                TestRequest::Message(TestMessageRequest {
                    purpose,
                    recipient: recipient.to_string(),
                    subject: self.test_message.subject.clone(),
                    body: self.test_message.body.clone(),
                })
            }
            _ => TestRequest::Connectivity(ConnectivityTestRequest { purpose, kind }),
        };

        self.in_flight.retain(|_, lease| lease.strong_count() > 0);
        let lease = Arc::new(());
        self.in_flight.insert((kind, purpose), Arc::downgrade(&lease));
        debug!(%kind, %purpose, "connectivity test started");
        Ok(TestTicket {
            kind,
            purpose,
            request,
            _lease: lease,
        })
    }

    /// Perform the remote call for an admitted test.
    pub fn dispatch(&self, ticket: &TestTicket) -> Result<TestResponse, BackendError> {
        match &ticket.request {
            TestRequest::Connectivity(request) => self.service.test_connectivity(request),
            TestRequest::Message(request) => self.service.send_test_message(request),
        }
    }

    /// Record the outcome on the profile and raise a notice. A failed call is
    /// a failed outcome, not an error.
    pub fn complete(
        &mut self,
        store: &mut ProfileStore,
        ticket: TestTicket,
        response: Result<TestResponse, BackendError>,
    ) -> TestOutcome {
        self.in_flight.remove(&(ticket.kind, ticket.purpose));

        let outcome = match response {
            Ok(response) if response.ok => TestOutcome::success(non_blank(response.message)),
            Ok(response) => TestOutcome::failure(
                non_blank(response.message).unwrap_or_else(|| store.generic_failure().to_string()),
            ),
            Err(error) => {
                warn!(kind = %ticket.kind, purpose = %ticket.purpose, %error, "connectivity test call failed");
                TestOutcome::failure(
                    error
                        .service_message()
                        .unwrap_or(store.generic_failure())
                        .to_string(),
                )
            }
        };

        info!(kind = %ticket.kind, purpose = %ticket.purpose, ok = outcome.ok, "connectivity test finished");
        let notice = if outcome.ok {
            Notice::success(
                outcome
                    .message
                    .clone()
                    .unwrap_or_else(|| success_text(ticket.kind)),
            )
        } else {
            Notice::error(outcome.message.clone().unwrap_or_default())
        };
        self.notices.notify(notice);

        store.record_test_outcome(ticket.purpose, ticket.kind, outcome.clone());
        outcome
    }

    /// Give up on a test whose response will never arrive. The slot is
    /// released and a failed outcome is recorded.
    pub fn abandon(&mut self, store: &mut ProfileStore, ticket: TestTicket) -> TestOutcome {
        warn!(kind = %ticket.kind, purpose = %ticket.purpose, "connectivity test abandoned");
        self.complete(
            store,
            ticket,
            Err(BackendError::unavailable(String::new())),
        )
    }

    /// `begin`, `dispatch` and `complete` in one call.
    pub fn test(
        &mut self,
        store: &mut ProfileStore,
        kind: TestKind,
        purpose: Purpose,
        recipient: Option<&str>,
    ) -> MailconfResult<TestOutcome> {
        let ticket = self.begin(kind, purpose, recipient)?;
        let response = self.dispatch(&ticket);
        Ok(self.complete(store, ticket, response))
    }
}

fn non_blank(message: Option<String>) -> Option<String> {
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

fn success_text(kind: TestKind) -> String {
    match kind {
        TestKind::Transport => "Outgoing mail server connection succeeded".to_string(),
        TestKind::RetrievalPrimary | TestKind::RetrievalSecondary => {
            "Incoming mail server connection succeeded".to_string()
        }
        TestKind::SendMessage => "Test message sent".to_string(),
    }
}
