//! Scenario: Publishing a signing key and verifying it.

use crate::common::*;
use mailconf::domain::ports::{BackendError, DomainKeyCheckResponse, NoticeLevel};
use mailconf::{MailconfError, VerificationStatus};

#[test]
fn scenario_empty_selector_never_reaches_dns() {
    let mut h = Harness::loaded();
    let before = h.store.signing_record().status;

    let err = h.checks.check_now(&mut h.store, "x.com", "").unwrap_err();

    assert!(matches!(err, MailconfError::DomainKeyFieldsRequired));
    assert!(err.is_local());
    assert_eq!(h.dns.call_count(), 0);
    assert_eq!(h.store.signing_record().status, before);
}

#[test]
fn scenario_valid_key_records_result() {
    let mut h = Harness::loaded();

    let status = h.checks.check_now(&mut h.store, "x.com", "mail").unwrap();

    assert_eq!(status, VerificationStatus::Valid);
    let record = h.store.signing_record();
    assert!(record.last_checked_at.is_some());
    assert_eq!(
        record.last_result.as_deref(),
        Some("v=DKIM1; k=rsa; p=MIIBIjANBgkqh")
    );
    assert_eq!(h.notices.last().unwrap().level, NoticeLevel::Success);
    // The check result participates in the save lifecycle.
    assert!(h.store.dirty_report().signing_record);
    h.store.save().unwrap();
    assert_eq!(
        h.backend.last_save().unwrap().signing_record.unwrap().status,
        VerificationStatus::Valid
    );
}

#[test]
fn scenario_dns_outage_is_unknown_not_invalid() {
    let mut h = Harness::with_services(
        ScriptedBackend::with_remote(remote_config()),
        ScriptedConnectivity::ok(),
        ScriptedDomainKey::answering(Err(BackendError::unavailable("resolver timeout"))),
    );
    h.store.load().unwrap();

    let status = h.checks.check_now(&mut h.store, "x.com", "mail").unwrap();

    assert_eq!(status, VerificationStatus::Unknown);
    assert_eq!(
        h.store.signing_record().last_result.as_deref(),
        Some("resolver timeout")
    );
}

#[test]
fn scenario_missing_record_is_invalid() {
    let mut h = Harness::with_services(
        ScriptedBackend::with_remote(remote_config()),
        ScriptedConnectivity::ok(),
        ScriptedDomainKey::answering(Ok(DomainKeyCheckResponse {
            ok: false,
            message: Some("no TXT record at mail._domainkey.x.com".into()),
            ..Default::default()
        })),
    );
    h.store.load().unwrap();

    let status = h.checks.check_now(&mut h.store, "x.com", "mail").unwrap();

    assert_eq!(status, VerificationStatus::Invalid);
    let notice = h.notices.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "no TXT record at mail._domainkey.x.com");
}

#[test]
fn scenario_second_check_while_checking_is_rejected() {
    let mut h = Harness::loaded();

    let ticket = h.checks.begin_check(&mut h.store, "x.com", "mail").unwrap();
    assert_eq!(h.store.signing_record().status, VerificationStatus::Checking);
    assert!(matches!(
        h.checks.begin_check(&mut h.store, "x.com", "mail"),
        Err(MailconfError::CheckInFlight)
    ));

    // Saving mid-check never persists `checking`.
    h.store.save().unwrap();
    assert_eq!(
        h.backend.last_save().unwrap().signing_record.unwrap().status,
        VerificationStatus::Unknown
    );

    let response = h.checks.dispatch(&ticket);
    let status = h.checks.complete(&mut h.store, ticket, response);
    assert_eq!(status, VerificationStatus::Valid);
}

#[test]
fn scenario_dropped_check_does_not_block_the_next_one() {
    let mut h = Harness::loaded();

    let ticket = h.checks.begin_check(&mut h.store, "x.com", "mail").unwrap();
    drop(ticket);
    assert!(!h.checks.is_checking());
    assert_eq!(h.store.signing_record().status, VerificationStatus::Checking);

    let status = h.checks.check_now(&mut h.store, "x.com", "mail").unwrap();
    assert_eq!(status, VerificationStatus::Valid);
    assert_eq!(h.dns.call_count(), 1);
}

#[test]
fn scenario_abandoned_check_returns_to_unknown() {
    let mut h = Harness::loaded();

    let ticket = h.checks.begin_check(&mut h.store, "x.com", "mail").unwrap();
    let status = h.checks.abandon(&mut h.store, ticket);

    assert_eq!(status, VerificationStatus::Unknown);
    let record = h.store.signing_record();
    assert_eq!(record.status, VerificationStatus::Unknown);
    assert!(record.last_result.is_some());
    assert_eq!(h.dns.call_count(), 0);
    assert_eq!(h.notices.last().unwrap().level, NoticeLevel::Info);
    assert!(h.checks.begin_check(&mut h.store, "x.com", "mail").is_ok());
}
