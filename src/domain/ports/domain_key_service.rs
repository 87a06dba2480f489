//! Domain-key DNS check port

use super::dto::{DomainKeyCheckRequest, DomainKeyCheckResponse};
use super::BackendError;

pub trait DomainKeyService: Send + Sync {
    /// `CheckDomainKey`: look up `<selector>._domainkey.<domain>`
    fn check_domain_key(
        &self,
        request: &DomainKeyCheckRequest,
    ) -> Result<DomainKeyCheckResponse, BackendError>;
}
