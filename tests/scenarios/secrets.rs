//! Scenario: Typing a password and then discarding the change.

use crate::common::*;
use mailconf::domain::value_objects::SecretField;
use mailconf::{Purpose, RetrievalSlot};

#[test]
fn scenario_revert_blanks_edited_secret() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Invites, "transport.password", "typed-by-mistake")
        .unwrap();
    h.store
        .set_field_by_name(Purpose::Invites, "retrieval_primary.password", "also-typed")
        .unwrap();
    assert!(h
        .store
        .profile(Purpose::Invites)
        .unwrap()
        .session
        .any_secret_edited());

    h.store.revert();

    let invites = h.store.profile(Purpose::Invites).unwrap();
    assert_eq!(invites.session.transport_password, SecretField::Unchanged);
    assert_eq!(invites.session.transport_password.display_value(), "");
    assert_eq!(
        invites.session.retrieval_password(RetrievalSlot::Primary),
        &SecretField::Unchanged
    );
    assert!(invites.data.retrieval(RetrievalSlot::Primary).enabled);
    assert!(!h.store.compute_dirty());
}

#[test]
fn scenario_password_only_change_is_saved_but_not_dirty() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Alerts, "transport.password", "rotated")
        .unwrap();

    assert!(!h.store.compute_dirty());

    h.store.save().unwrap();
    let sent = h.backend.last_save().unwrap();
    assert_eq!(
        sent.profiles[&Purpose::Alerts].transport.password.as_deref(),
        Some("rotated")
    );
}
