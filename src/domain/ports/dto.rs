//! Wire shapes exchanged with the settings and test services
//!
//! JSON over REST is the existing convention, so field names follow the
//! service's camelCase. Secret fields are write-only: they appear on requests
//! when the user edited them and are expected to be absent on responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::RetrievalBlock;
use crate::domain::value_objects::{Purpose, TestKind, VerificationStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub host: String,
    #[serde(
        default,
        deserialize_with = "lenient_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from_address: String,
    #[serde(default, rename = "useTLS")]
    pub use_tls: bool,
    #[serde(default, rename = "useSSL")]
    pub use_ssl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_secure_transport")]
    pub use_secure_transport: bool,
}

fn default_secure_transport() -> bool {
    RetrievalBlock::DEFAULT_SECURE_TRANSPORT
}

impl Default for RetrievalDto {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            use_secure_transport: default_secure_transport(),
        }
    }
}

impl RetrievalDto {
    /// A block counts as enabled when any non-secret field or the secret
    /// carries a value.
    pub fn indicates_enabled(&self) -> bool {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.host) || self.port.is_some() || filled(&self.username) || self.password.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub transport: TransportDto,
    #[serde(default)]
    pub retrieval_primary: RetrievalDto,
    #[serde(default)]
    pub retrieval_secondary: RetrievalDto,
}

fn default_enabled() -> bool {
    true
}

impl Default for ProfileDto {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            transport: TransportDto::default(),
            retrieval_primary: RetrievalDto::default(),
            retrieval_secondary: RetrievalDto::default(),
        }
    }
}

impl ProfileDto {
    /// Copy without any secret values, as a server would return it.
    pub fn without_secrets(&self) -> Self {
        let mut dto = self.clone();
        dto.transport.password = None;
        dto.retrieval_primary.password = None;
        dto.retrieval_secondary.password = None;
        dto
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRecordDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub selector: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub public_key: String,
    #[serde(default)]
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<String>,
}

/// Response of `GetConfig`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    #[serde(default)]
    pub profiles: BTreeMap<Purpose, ProfileDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_record: Option<SigningRecordDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request of `SaveConfig`; backends may ignore `signing_record`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigRequest {
    pub profiles: BTreeMap<Purpose, ProfileDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_record: Option<SigningRecordDto>,
}

/// Request of the best-effort `SaveSigningRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSigningRecordRequest {
    pub signing_record: SigningRecordDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityTestRequest {
    pub purpose: Purpose,
    pub kind: TestKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMessageRequest {
    pub purpose: Purpose,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainKeyCheckRequest {
    pub domain: String,
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainKeyCheckResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// TXT record text as found in DNS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// `null` and missing both mean "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(i64),
    Text(String),
}

// Ports arrive as numbers, numeric strings, "" or null. Blank and
// unrepresentable values normalize to absent.
fn lenient_port<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let port = match Option::<PortRepr>::deserialize(deserializer)? {
        None => None,
        Some(PortRepr::Number(n)) => u32::try_from(n).ok(),
        Some(PortRepr::Text(text)) => text.trim().parse::<u32>().ok(),
    };
    Ok(port)
}
