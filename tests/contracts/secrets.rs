//! Secret non-leak contracts
//!
//! A secret reaches the wire only when edited in this session, never moves
//! between profiles, and never shows up in debug output.

use crate::common::*;
use mailconf::domain::value_objects::SecretField;
use mailconf::{Purpose, RetrievalSlot, TestKind};

/// CONTRACT: Unedited secrets are absent from save payloads
mod save_payload {
    use super::*;

    #[test]
    fn contract_unedited_secrets_are_omitted() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Alerts, "transport.host", "smtp.y.com")
            .unwrap();

        h.store.save().unwrap();

        let sent = h.backend.last_save().unwrap();
        for (purpose, profile) in &sent.profiles {
            assert_eq!(profile.transport.password, None, "{purpose} leaked");
            assert_eq!(profile.retrieval_primary.password, None, "{purpose} leaked");
            assert_eq!(profile.retrieval_secondary.password, None, "{purpose} leaked");
        }
    }

    #[test]
    fn contract_secret_sent_once_then_cleared() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Invites, "retrieval_primary.password", "imap-pass")
            .unwrap();

        h.store.save().unwrap();
        let first = h.backend.last_save().unwrap();
        assert_eq!(
            first.profiles[&Purpose::Invites]
                .retrieval_primary
                .password
                .as_deref(),
            Some("imap-pass")
        );

        h.store
            .set_field_by_name(Purpose::Invites, "transport.port", "2525")
            .unwrap();
        h.store.save().unwrap();
        let second = h.backend.last_save().unwrap();
        assert_eq!(second.profiles[&Purpose::Invites].retrieval_primary.password, None);
    }

    #[test]
    fn contract_secret_of_disabled_block_is_not_sent() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Invites, "retrieval_primary.password", "imap-pass")
            .unwrap();
        h.store
            .set_retrieval_enabled(Purpose::Invites, RetrievalSlot::Primary, false);

        h.store.save().unwrap();

        let sent = h.backend.last_save().unwrap();
        assert_eq!(sent.profiles[&Purpose::Invites].retrieval_primary.password, None);
    }
}

/// CONTRACT: copy_between never copies a secret
mod copy {
    use super::*;

    #[test]
    fn contract_copy_clears_destination_secrets_and_outcomes() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Alerts, "transport.password", "source-secret")
            .unwrap();
        h.store
            .set_field_by_name(Purpose::Reports, "transport.password", "dest-secret")
            .unwrap();
        h.tests
            .test(&mut h.store, TestKind::Transport, Purpose::Reports, None)
            .unwrap();

        h.store.copy_between(Purpose::Reports, Purpose::Alerts);

        let reports = h.store.profile(Purpose::Reports).unwrap();
        assert_eq!(reports.session.transport_password, SecretField::Unchanged);
        assert!(reports.session.test_outcomes.is_empty());
        assert_eq!(
            reports.data.transport.host,
            h.store.profile(Purpose::Alerts).unwrap().data.transport.host
        );
    }
}

#[test]
fn contract_debug_output_redacts_secrets() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Alerts, "transport.password", "hunter2")
        .unwrap();

    let debug = format!("{:?}", h.store.profile(Purpose::Alerts).unwrap());
    assert!(!debug.contains("hunter2"));
}
