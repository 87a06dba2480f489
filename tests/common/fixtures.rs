//! Test fixtures - reusable payloads and a wired-up controller.

use std::sync::Arc;

use mailconf::domain::ports::{
    DomainKeyCheckResponse, ProfileDto, RemoteConfig, RetrievalDto, SigningRecordDto,
    TransportDto,
};
use mailconf::{
    ConnectivityTestCoordinator, ControllerConfig, DomainKeyCoordinator, ProfileStore, Purpose,
};

use super::backends::*;

/// `alerts` transport from the preset walkthrough
pub fn alerts_profile() -> ProfileDto {
    ProfileDto {
        transport: TransportDto {
            host: "smtp.example.com".into(),
            port: Some(587),
            username: "mailer@x.com".into(),
            from_address: "a@x.com".into(),
            use_tls: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A profile with the primary retrieval block configured
pub fn invites_profile() -> ProfileDto {
    ProfileDto {
        transport: TransportDto {
            host: "smtp.sendgrid.net".into(),
            port: Some(587),
            username: "apikey".into(),
            from_address: "invites@x.com".into(),
            use_tls: true,
            ..Default::default()
        },
        retrieval_primary: RetrievalDto {
            host: Some("imap.x.com".into()),
            port: Some(993),
            username: Some("bounces@x.com".into()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn signing_record() -> SigningRecordDto {
    SigningRecordDto {
        domain: "x.com".into(),
        selector: "mail".into(),
        public_key: "MIIBIjANBgkqh".into(),
        ..Default::default()
    }
}

pub fn remote_config() -> RemoteConfig {
    let mut remote = RemoteConfig::default();
    remote.profiles.insert(Purpose::Alerts, alerts_profile());
    remote.profiles.insert(Purpose::Invites, invites_profile());
    remote.signing_record = Some(signing_record());
    remote
}

pub fn dns_valid() -> DomainKeyCheckResponse {
    DomainKeyCheckResponse {
        ok: true,
        status: Some("valid".into()),
        record: Some("v=DKIM1; k=rsa; p=MIIBIjANBgkqh".into()),
        ..Default::default()
    }
}

/// Everything a panel would wire together, with handles to the fakes.
pub struct Harness {
    pub store: ProfileStore,
    pub tests: ConnectivityTestCoordinator,
    pub checks: DomainKeyCoordinator,
    pub backend: Arc<ScriptedBackend>,
    pub connectivity: Arc<ScriptedConnectivity>,
    pub dns: Arc<ScriptedDomainKey>,
    pub notices: Arc<RecordingNoticeSink>,
}

impl Harness {
    pub fn new(remote: RemoteConfig) -> Self {
        Self::with_services(
            ScriptedBackend::with_remote(remote),
            ScriptedConnectivity::ok(),
            ScriptedDomainKey::answering(Ok(dns_valid())),
        )
    }

    pub fn with_services(
        backend: ScriptedBackend,
        connectivity: ScriptedConnectivity,
        dns: ScriptedDomainKey,
    ) -> Self {
        let config = ControllerConfig::default();
        let backend = Arc::new(backend);
        let connectivity = Arc::new(connectivity);
        let dns = Arc::new(dns);
        let notices = Arc::new(RecordingNoticeSink::default());
        Self {
            store: ProfileStore::new(backend.clone(), notices.clone(), &config),
            tests: ConnectivityTestCoordinator::new(
                connectivity.clone(),
                notices.clone(),
                config.test_message.clone(),
            ),
            checks: DomainKeyCoordinator::new(dns.clone(), notices.clone()),
            backend,
            connectivity,
            dns,
            notices,
        }
    }

    /// Harness over [`remote_config`], already loaded.
    pub fn loaded() -> Self {
        let mut harness = Self::new(remote_config());
        harness.store.load().expect("load");
        harness
    }
}
