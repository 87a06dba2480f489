//! Scenario: Testing connections before saving.

use crate::common::*;
use mailconf::domain::ports::{BackendError, NoticeLevel, TestResponse};
use mailconf::{MailconfError, Purpose, TestKind};

#[test]
fn scenario_send_test_message_requires_recipient() {
    let mut h = Harness::loaded();

    let err = h
        .tests
        .test(&mut h.store, TestKind::SendMessage, Purpose::Alerts, None)
        .unwrap_err();

    assert!(matches!(err, MailconfError::RecipientRequired));
    assert_eq!(h.connectivity.call_count(), 0);
    assert!(h.notices.all().is_empty());
}

#[test]
fn scenario_each_retrieval_test_is_cached_separately() {
    let mut h = Harness::with_services(
        ScriptedBackend::with_remote(remote_config()),
        ScriptedConnectivity::answering(Ok(TestResponse {
            ok: false,
            message: Some("login rejected".into()),
        })),
        ScriptedDomainKey::answering(Ok(dns_valid())),
    );
    h.store.load().unwrap();

    h.tests
        .test(&mut h.store, TestKind::RetrievalPrimary, Purpose::Invites, None)
        .unwrap();

    let invites = h.store.profile(Purpose::Invites).unwrap();
    let outcome = invites.test_outcome(TestKind::RetrievalPrimary).unwrap();
    assert!(!outcome.ok);
    assert_eq!(outcome.message.as_deref(), Some("login rejected"));
    assert!(invites.test_outcome(TestKind::Transport).is_none());
    assert_eq!(h.notices.last().unwrap().level, NoticeLevel::Error);
    // Test outcomes are session state only.
    assert!(!h.store.compute_dirty());
}

#[test]
fn scenario_unreachable_service_is_a_failed_outcome() {
    let mut h = Harness::with_services(
        ScriptedBackend::with_remote(remote_config()),
        ScriptedConnectivity::answering(Err(BackendError::unavailable(""))),
        ScriptedDomainKey::answering(Ok(dns_valid())),
    );
    h.store.load().unwrap();

    let outcome = h
        .tests
        .test(&mut h.store, TestKind::Transport, Purpose::Alerts, None)
        .unwrap();

    assert!(!outcome.ok);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Something went wrong. Please try again.")
    );
    assert!(h.tests.in_flight().next().is_none());
}

#[test]
fn scenario_overlapping_tests_for_different_profiles() {
    let mut h = Harness::loaded();

    let alerts = h
        .tests
        .begin(TestKind::Transport, Purpose::Alerts, None)
        .unwrap();
    let invites = h
        .tests
        .begin(TestKind::Transport, Purpose::Invites, None)
        .unwrap();
    assert!(matches!(
        h.tests.begin(TestKind::Transport, Purpose::Alerts, None),
        Err(MailconfError::TestInFlight { .. })
    ));

    let response = h.tests.dispatch(&invites);
    h.tests.complete(&mut h.store, invites, response);
    let response = h.tests.dispatch(&alerts);
    h.tests.complete(&mut h.store, alerts, response);

    for purpose in [Purpose::Alerts, Purpose::Invites] {
        assert!(h
            .store
            .profile(purpose)
            .unwrap()
            .test_outcome(TestKind::Transport)
            .unwrap()
            .ok);
    }
}

#[test]
fn scenario_test_can_be_retried_after_a_lost_response() {
    let mut h = Harness::loaded();

    // The worker running the first attempt died before reporting back.
    let lost = h.tests.begin(TestKind::Transport, Purpose::Alerts, None).unwrap();
    drop(lost);

    let outcome = h
        .tests
        .test(&mut h.store, TestKind::Transport, Purpose::Alerts, None)
        .unwrap();
    assert!(outcome.ok);
    assert_eq!(h.connectivity.call_count(), 1);
}
