//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer (or the embedding application) provides concrete
//! implementations.

mod backend_error;
pub mod connectivity_service;
pub mod domain_key_service;
pub mod dto;
pub mod notice_sink;
pub mod settings_backend;

pub use backend_error::BackendError;
pub use connectivity_service::ConnectivityService;
pub use domain_key_service::DomainKeyService;
pub use dto::{
    ConnectivityTestRequest, DomainKeyCheckRequest, DomainKeyCheckResponse, ProfileDto,
    RemoteConfig, RetrievalDto, SaveConfigRequest, SaveSigningRecordRequest, SigningRecordDto,
    TestMessageRequest, TestResponse, TransportDto,
};
pub use notice_sink::{Notice, NoticeLevel, NoticeSink, NoopNoticeSink};
pub use settings_backend::SettingsBackend;
