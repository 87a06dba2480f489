//! Scenario: The backend has not learned about signing records yet.

use crate::common::*;
use mailconf::domain::ports::NoticeLevel;
use mailconf::{Purpose, SigningField};

#[test]
fn scenario_profiles_only_save_clears_dirty_and_updates_snapshot() {
    let mut h = Harness::loaded();
    h.backend.fail(Failures {
        combined: true,
        signing_record: true,
        ..Default::default()
    });
    h.store
        .set_field_by_name(Purpose::Alerts, "transport.host", "smtp.postmarkapp.com")
        .unwrap();
    h.store.set_signing_field(SigningField::Selector, "pm");
    assert!(h.store.compute_dirty());

    let report = h.store.save().unwrap();

    assert_eq!(report.strategy, "profiles-only");
    assert!(!h.store.compute_dirty());
    assert_eq!(
        h.store
            .snapshot()
            .profile(Purpose::Alerts)
            .unwrap()
            .transport
            .host,
        "smtp.postmarkapp.com"
    );
    assert_eq!(h.store.snapshot().signing_record().selector, "pm");

    let requests = h.backend.save_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].signing_record.is_some());
    assert!(requests[1].signing_record.is_none());
    assert_eq!(h.notices.last().unwrap().level, NoticeLevel::Success);
}

#[test]
fn scenario_save_payload_shape() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Invites, "transport.password", "sg-key")
        .unwrap();

    h.store.save().unwrap();

    let sent = h.backend.last_save().unwrap();
    let invites = serde_json::to_string_pretty(&sent.profiles[&Purpose::Invites]).unwrap();
    insta::assert_snapshot!(invites, @r#"
    {
      "enabled": true,
      "transport": {
        "host": "smtp.sendgrid.net",
        "port": 587,
        "username": "apikey",
        "password": "sg-key",
        "fromAddress": "invites@x.com",
        "useTLS": true,
        "useSSL": false
      },
      "retrievalPrimary": {
        "host": "imap.x.com",
        "port": 993,
        "username": "bounces@x.com",
        "useSecureTransport": true
      },
      "retrievalSecondary": {
        "useSecureTransport": true
      }
    }
    "#);
}
