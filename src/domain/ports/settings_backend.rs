//! Settings persistence port
//!
//! The three persistence endpoints the controller talks to. The schema of the
//! backend evolves independently of the client, so `save_config` may ignore
//! the signing record and `save_signing_record` may be missing entirely.

use super::dto::{RemoteConfig, SaveConfigRequest, SaveSigningRecordRequest};
use super::BackendError;

pub trait SettingsBackend: Send + Sync {
    /// `GetConfig`: all profiles (secrets absent) and the signing record
    fn get_config(&self) -> Result<RemoteConfig, BackendError>;

    /// `SaveConfig`: profiles plus, optionally, the signing record
    fn save_config(&self, request: &SaveConfigRequest) -> Result<(), BackendError>;

    /// `SaveSigningRecord`: best-effort, may be unsupported
    fn save_signing_record(&self, request: &SaveSigningRecordRequest) -> Result<(), BackendError>;
}
