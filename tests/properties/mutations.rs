//! Property tests for invariants under arbitrary edit sequences.

use proptest::prelude::*;

use crate::common::*;
use mailconf::domain::entities::SanitizedRetrieval;
use mailconf::domain::services::Sanitize;
use mailconf::{Purpose, RetrievalSlot, SecurityFlag};

#[derive(Debug, Clone)]
enum Edit {
    Flag(Purpose, SecurityFlag, bool),
    Retrieval(Purpose, RetrievalSlot, bool),
    Field(Purpose, &'static str, String),
    Preset(Purpose, &'static str),
    Copy(Purpose, Purpose),
    Revert,
    Defaults,
}

fn purpose() -> impl Strategy<Value = Purpose> {
    proptest::sample::select(Purpose::ALL.to_vec())
}

fn slot() -> impl Strategy<Value = RetrievalSlot> {
    proptest::sample::select(RetrievalSlot::ALL.to_vec())
}

fn flag() -> impl Strategy<Value = SecurityFlag> {
    prop_oneof![Just(SecurityFlag::Tls), Just(SecurityFlag::Ssl)]
}

const FIELDS: &[&str] = &[
    "transport.host",
    "transport.port",
    "transport.useTLS",
    "transport.useSSL",
    "retrieval_primary.host",
    "retrieval_primary.port",
    "retrieval_primary.password",
    "retrieval_secondary.username",
    "retrieval_secondary.use_secure_transport",
];

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (purpose(), flag(), any::<bool>()).prop_map(|(p, f, on)| Edit::Flag(p, f, on)),
        (purpose(), slot(), any::<bool>()).prop_map(|(p, s, on)| Edit::Retrieval(p, s, on)),
        (
            purpose(),
            proptest::sample::select(FIELDS.to_vec()),
            prop_oneof![
                Just("true".to_string()),
                Just(String::new()),
                Just("993".to_string()),
                proptest::string::string_regex("[a-z.]{1,10}").unwrap(),
            ]
        )
            .prop_map(|(p, f, v)| Edit::Field(p, f, v)),
        (purpose(), proptest::sample::select(vec!["gmail", "yahoo", "ses", "postmark"]))
            .prop_map(|(p, k)| Edit::Preset(p, k)),
        (purpose(), purpose()).prop_map(|(a, b)| Edit::Copy(a, b)),
        Just(Edit::Revert),
        Just(Edit::Defaults),
    ]
}

fn apply(h: &mut Harness, edit: &Edit) {
    match edit {
        Edit::Flag(p, f, on) => h.store.set_security_flag(*p, *f, *on),
        Edit::Retrieval(p, s, on) => h.store.set_retrieval_enabled(*p, *s, *on),
        // Type mismatches are local errors and leave state as it was.
        Edit::Field(p, f, v) => {
            let _ = h.store.set_field_by_name(*p, f, v.as_str());
        }
        Edit::Preset(p, k) => h.store.apply_preset(*p, k).unwrap(),
        Edit::Copy(dest, src) => h.store.copy_between(*dest, *src),
        Edit::Revert => h.store.revert(),
        Edit::Defaults => h.store.restore_defaults(),
    }
}

/// Retrieval config a copy should produce: only blocks with non-secret
/// content stay enabled.
fn expected_after_copy(block: Option<&SanitizedRetrieval>) -> Option<SanitizedRetrieval> {
    block
        .filter(|r| !r.host.trim().is_empty() || r.port.is_some() || !r.username.trim().is_empty())
        .cloned()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After any edit sequence, at most one security flag and at
    /// most one retrieval block are set on every profile.
    #[test]
    fn property_exclusivity_survives_any_edit_sequence(
        edits in proptest::collection::vec(edit(), 0..24)
    ) {
        let mut h = Harness::loaded();
        for edit in &edits {
            apply(&mut h, edit);
            for profile in h.store.profiles().values() {
                let t = &profile.data.transport;
                prop_assert!(!(t.use_tls() && t.use_ssl()), "after {:?}", edit);
                prop_assert!(!profile.data.both_retrievals_enabled(), "after {:?}", edit);
            }
        }
    }

    /// PROPERTY: Immediately after a successful save nothing is dirty.
    #[test]
    fn property_clean_after_save(
        edits in proptest::collection::vec(edit(), 0..16)
    ) {
        let mut h = Harness::loaded();
        for edit in &edits {
            apply(&mut h, edit);
        }
        h.store.save().unwrap();
        prop_assert!(!h.store.compute_dirty(), "dirty: {:?}", h.store.dirty_report());
        prop_assert!(h.store.profiles().values().all(|p| !p.session.any_secret_edited()));
    }

    /// PROPERTY: Revert always returns to a clean state.
    #[test]
    fn property_clean_after_revert(
        edits in proptest::collection::vec(edit(), 0..16)
    ) {
        let mut h = Harness::loaded();
        for edit in &edits {
            apply(&mut h, edit);
        }
        h.store.revert();
        prop_assert!(!h.store.compute_dirty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A copied profile carries the source's active retrieval
    /// configuration and nothing from its inactive block.
    #[test]
    fn property_copy_matches_source_retrieval(
        edits in proptest::collection::vec(edit(), 0..16),
        dest in purpose(),
        src in purpose(),
    ) {
        prop_assume!(dest != src);
        let mut h = Harness::loaded();
        for edit in &edits {
            apply(&mut h, edit);
        }
        let source = h.store.profile(src).unwrap().sanitize();

        h.store.copy_between(dest, src);

        let copied = h.store.profile(dest).unwrap().sanitize();
        prop_assert_eq!(&copied.transport, &source.transport);
        for slot in RetrievalSlot::ALL {
            prop_assert_eq!(
                copied.retrieval(slot).cloned(),
                expected_after_copy(source.retrieval(slot)),
                "slot {:?}", slot
            );
        }
    }
}
