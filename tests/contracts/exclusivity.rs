//! Mutual exclusivity contracts
//!
//! At most one of TLS/SSL is set, and at most one retrieval block is enabled,
//! whatever path the state arrived through.

use crate::common::*;
use mailconf::domain::ports::{ProfileDto, RemoteConfig, RetrievalDto, TransportDto};
use mailconf::domain::entities::RetrievalBlock;
use mailconf::domain::services::Sanitize;
use mailconf::{FieldPath, Purpose, RetrievalSlot, SecurityFlag};

/// CONTRACT: Security flags never both set through edits
mod security_flags {
    use super::*;

    #[test]
    fn contract_setting_tls_clears_ssl() {
        let mut h = Harness::loaded();
        h.store.set_security_flag(Purpose::Alerts, SecurityFlag::Ssl, true);
        h.store.set_security_flag(Purpose::Alerts, SecurityFlag::Tls, true);

        let transport = &h.store.profile(Purpose::Alerts).unwrap().data.transport;
        assert!(transport.use_tls());
        assert!(!transport.use_ssl());
    }

    #[test]
    fn contract_field_path_flags_route_through_exclusivity() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Alerts, "transport.useSSL", true)
            .unwrap();

        let transport = &h.store.profile(Purpose::Alerts).unwrap().data.transport;
        assert!(transport.use_ssl());
        assert!(!transport.use_tls());
    }

    #[test]
    fn contract_presets_never_set_both() {
        let mut h = Harness::loaded();
        let keys: Vec<String> = h.store.catalog().iter().map(|p| p.key.clone()).collect();

        for key in keys {
            h.store.apply_preset(Purpose::Alerts, &key).unwrap();
            let transport = &h.store.profile(Purpose::Alerts).unwrap().data.transport;
            assert!(
                !(transport.use_tls() && transport.use_ssl()),
                "preset {key} set both flags"
            );
        }
    }

    #[test]
    fn contract_conflicting_server_flags_are_reported_not_hidden() {
        let mut remote = RemoteConfig::default();
        remote.profiles.insert(
            Purpose::Reports,
            ProfileDto {
                transport: TransportDto {
                    host: "smtp.x.com".into(),
                    port: Some(25),
                    from_address: "r@x.com".into(),
                    use_tls: true,
                    use_ssl: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let mut h = Harness::new(remote);
        h.store.load().unwrap();

        let report = h.store.validate(Purpose::Reports);
        assert!(report
            .messages()
            .contains(&"TLS and SSL cannot both be enabled"));
        assert!(!h.store.transport_ready(Purpose::Reports));
    }
}

/// CONTRACT: At most one retrieval block enabled
mod retrieval_blocks {
    use super::*;

    #[test]
    fn contract_load_disables_secondary_when_both_present() {
        let mut remote = RemoteConfig::default();
        remote.profiles.insert(
            Purpose::Alerts,
            ProfileDto {
                retrieval_primary: RetrievalDto {
                    host: Some("imap.x.com".into()),
                    ..Default::default()
                },
                retrieval_secondary: RetrievalDto {
                    host: Some("pop.x.com".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let mut h = Harness::new(remote);
        h.store.load().unwrap();

        let data = &h.store.profile(Purpose::Alerts).unwrap().data;
        assert_eq!(data.active_retrieval(), Some(RetrievalSlot::Primary));
        assert!(!data.both_retrievals_enabled());
    }

    #[test]
    fn contract_typing_into_a_block_disables_the_other() {
        let mut h = Harness::loaded();
        h.store
            .set_field(
                Purpose::Invites,
                "retrieval_secondary.username".parse::<FieldPath>().unwrap(),
                "catchall@x.com",
            )
            .unwrap();

        let data = &h.store.profile(Purpose::Invites).unwrap().data;
        assert_eq!(data.active_retrieval(), Some(RetrievalSlot::Secondary));
        assert!(!data.retrieval(RetrievalSlot::Primary).enabled);
    }

    #[test]
    fn contract_copy_keeps_single_active_block() {
        let mut h = Harness::loaded();
        h.store
            .set_field_by_name(Purpose::Alerts, "retrieval_secondary.host", "pop.x.com")
            .unwrap();
        h.store
            .set_retrieval_enabled(Purpose::Alerts, RetrievalSlot::Primary, true);
        h.store
            .set_field_by_name(Purpose::Alerts, "retrieval_primary.host", "imap.x.com")
            .unwrap();

        h.store.copy_between(Purpose::Reports, Purpose::Alerts);

        let data = &h.store.profile(Purpose::Reports).unwrap().data;
        assert!(!data.both_retrievals_enabled());
        assert_eq!(data.active_retrieval(), Some(RetrievalSlot::Primary));
    }

    #[test]
    fn contract_copy_drops_leftovers_of_inactive_source_block() {
        let mut h = Harness::loaded();
        // Invites starts with primary active; typing into secondary switches
        // it over and leaves the primary values behind as leftovers.
        h.store
            .set_field_by_name(Purpose::Invites, "retrieval_secondary.host", "pop.x.com")
            .unwrap();

        h.store.copy_between(Purpose::Reports, Purpose::Invites);

        let reports = h.store.profile(Purpose::Reports).unwrap();
        let invites = h.store.profile(Purpose::Invites).unwrap();
        assert_eq!(reports.data.active_retrieval(), Some(RetrievalSlot::Secondary));
        assert_eq!(
            reports.data.retrieval(RetrievalSlot::Primary),
            &RetrievalBlock::default()
        );

        let (copied, source) = (reports.sanitize(), invites.sanitize());
        assert_eq!(copied.retrieval_primary, source.retrieval_primary);
        assert_eq!(copied.retrieval_secondary, source.retrieval_secondary);
        assert_eq!(copied.transport, source.transport);
    }
}
