//! JSON Settings Backend
//!
//! File-backed implementation of the persistence endpoints. Secrets are
//! stored but never returned; a save that omits a secret keeps the stored one.
//! Writes go through a temp file and rename under an exclusive lock.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::ports::{
    BackendError, ProfileDto, RemoteConfig, RetrievalDto, SaveConfigRequest,
    SaveSigningRecordRequest, SettingsBackend,
};

pub struct JsonFileSettingsBackend {
    path: PathBuf,
    signing_record_support: bool,
}

impl JsonFileSettingsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            signing_record_support: true,
        }
    }

    /// Behave like a backend that predates signing records: combined saves
    /// carrying one are rejected and the signing-record endpoint is missing.
    pub fn with_signing_record_support(mut self, supported: bool) -> Self {
        self.signing_record_support = supported;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load_from_disk(&self) -> Result<RemoteConfig, BackendError> {
        if !self.path.exists() {
            return Ok(RemoteConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(access_error)?;
        serde_json::from_str(&content).map_err(|e| BackendError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save_to_disk(&self, stored: &RemoteConfig) -> Result<(), BackendError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(access_error)?;

        let content = serde_json::to_string_pretty(stored)
            .map_err(|e| BackendError::rejected(e.to_string()))?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(access_error)?;
        temp.write_all(content.as_bytes()).map_err(access_error)?;
        temp.persist(&self.path)
            .map_err(|e| access_error(e.error))?;
        Ok(())
    }

    /// Run `update` on the stored state while holding the lock file.
    fn locked_update<F>(&self, update: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut RemoteConfig),
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(access_error)?;
            }
        }

        let lock_file = fs::File::create(&lock_path).map_err(access_error)?;
        lock_file.lock_exclusive().map_err(access_error)?;

        let result = self.load_from_disk().and_then(|mut stored| {
            update(&mut stored);
            stored.last_updated = Some(Utc::now());
            self.save_to_disk(&stored)
        });

        let _ = lock_file.unlock();
        result
    }
}

impl SettingsBackend for JsonFileSettingsBackend {
    fn get_config(&self) -> Result<RemoteConfig, BackendError> {
        let mut stored = self.load_from_disk()?;
        stored.profiles = stored
            .profiles
            .iter()
            .map(|(purpose, dto)| (*purpose, dto.without_secrets()))
            .collect();
        if !self.signing_record_support {
            stored.signing_record = None;
        }
        Ok(stored)
    }

    fn save_config(&self, request: &SaveConfigRequest) -> Result<(), BackendError> {
        if request.signing_record.is_some() && !self.signing_record_support {
            return Err(BackendError::rejected("unknown field `signingRecord`"));
        }

        self.locked_update(|stored| {
            for (purpose, incoming) in &request.profiles {
                let merged = match stored.profiles.get(purpose) {
                    Some(previous) => merge_secrets(incoming, previous),
                    None => incoming.clone(),
                };
                stored.profiles.insert(*purpose, merged);
            }
            if let Some(record) = &request.signing_record {
                stored.signing_record = Some(record.clone());
            }
        })?;

        debug!(path = %self.path.display(), profiles = request.profiles.len(), "settings written");
        Ok(())
    }

    fn save_signing_record(&self, request: &SaveSigningRecordRequest) -> Result<(), BackendError> {
        if !self.signing_record_support {
            return Err(BackendError::Unsupported {
                operation: "SaveSigningRecord".to_string(),
            });
        }
        self.locked_update(|stored| {
            stored.signing_record = Some(request.signing_record.clone());
        })
    }
}

/// Keep stored secrets the request left out. A retrieval block sent zeroed
/// drops its stored secret with it.
fn merge_secrets(incoming: &ProfileDto, previous: &ProfileDto) -> ProfileDto {
    let mut merged = incoming.clone();
    if merged.transport.password.is_none() {
        merged.transport.password = previous.transport.password.clone();
    }
    merge_block(&mut merged.retrieval_primary, &previous.retrieval_primary);
    merge_block(&mut merged.retrieval_secondary, &previous.retrieval_secondary);
    merged
}

fn merge_block(incoming: &mut RetrievalDto, previous: &RetrievalDto) {
    if incoming.password.is_none() && incoming.indicates_enabled() {
        incoming.password = previous.password.clone();
    }
}

fn access_error(e: std::io::Error) -> BackendError {
    BackendError::unavailable(e.to_string())
}
