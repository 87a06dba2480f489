//! Scenario: Switching the inbound mechanism from secondary to primary.

use crate::common::*;
use mailconf::domain::services::Sanitize;
use mailconf::{Purpose, RetrievalSlot};

#[test]
fn scenario_enabling_primary_disables_and_canonicalizes_secondary() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Alerts, "retrieval_secondary.host", "pop.x.com")
        .unwrap();
    h.store
        .set_field_by_name(Purpose::Alerts, "retrieval_secondary.port", "995")
        .unwrap();

    h.store
        .set_retrieval_enabled(Purpose::Alerts, RetrievalSlot::Primary, true);

    let profile = h.store.profile(Purpose::Alerts).unwrap();
    assert!(!profile.data.retrieval(RetrievalSlot::Secondary).enabled);
    // Leftover values stay in the form but vanish from the comparable form.
    assert_eq!(profile.data.retrieval(RetrievalSlot::Secondary).host, "pop.x.com");
    let sanitized = profile.sanitize();
    assert_eq!(sanitized.retrieval_secondary, None);
    assert!(sanitized.retrieval_primary.is_some());
}

#[test]
fn scenario_disabling_a_block_with_leftovers_is_clean() {
    let mut h = Harness::loaded();

    h.store
        .set_field_by_name(Purpose::Alerts, "retrieval_primary.host", "imap.typo")
        .unwrap();
    assert!(h.store.compute_dirty());

    h.store
        .set_retrieval_enabled(Purpose::Alerts, RetrievalSlot::Primary, false);
    assert!(!h.store.compute_dirty());
}

#[test]
fn scenario_validation_lists_every_problem() {
    let mut h = Harness::loaded();
    h.store
        .set_field_by_name(Purpose::Alerts, "transport.host", "")
        .unwrap();
    h.store
        .set_field_by_name(Purpose::Alerts, "transport.from_address", "not-an-email")
        .unwrap();
    h.store
        .set_field_by_name(Purpose::Alerts, "retrieval_primary.password", "")
        .unwrap();

    let report = h.store.validate(Purpose::Alerts);

    let messages = report.messages();
    assert!(messages.contains(&"Transport host is required"));
    assert!(messages.contains(&"From address must be a valid email address"));
    assert!(messages.contains(&"Primary retrieval host is required"));
    assert!(messages.contains(&"Primary retrieval password is required"));
    assert!(!report.readiness.transport);
    assert!(!h.store.can_save());
}
