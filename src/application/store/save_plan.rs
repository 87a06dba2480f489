//! Save Plan
//!
//! The backend schema moves independently of this client, so a save is an
//! ordered list of strategies. Each strategy is a list of stages; a required
//! stage failing abandons the strategy and the next one is tried. Best-effort
//! stages may fail without affecting the outcome.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::ports::{
    BackendError, ProfileDto, SaveConfigRequest, SaveSigningRecordRequest, SettingsBackend,
    SigningRecordDto,
};
use crate::domain::value_objects::Purpose;
use crate::error::MailconfError;

/// Exactly what a save sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePayload {
    pub profiles: BTreeMap<Purpose, ProfileDto>,
    pub signing_record: SigningRecordDto,
}

impl SavePayload {
    pub fn combined_request(&self) -> SaveConfigRequest {
        SaveConfigRequest {
            profiles: self.profiles.clone(),
            signing_record: Some(self.signing_record.clone()),
        }
    }

    pub fn profiles_request(&self) -> SaveConfigRequest {
        SaveConfigRequest {
            profiles: self.profiles.clone(),
            signing_record: None,
        }
    }

    pub fn signing_record_request(&self) -> SaveSigningRecordRequest {
        SaveSigningRecordRequest {
            signing_record: self.signing_record.clone(),
        }
    }
}

/// One backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCall {
    Combined,
    ProfilesOnly,
    SigningRecordOnly,
}

impl SaveCall {
    fn invoke(self, backend: &dyn SettingsBackend, payload: &SavePayload) -> Result<(), BackendError> {
        match self {
            SaveCall::Combined => backend.save_config(&payload.combined_request()),
            SaveCall::ProfilesOnly => backend.save_config(&payload.profiles_request()),
            SaveCall::SigningRecordOnly => {
                backend.save_signing_record(&payload.signing_record_request())
            }
        }
    }

    fn persists_signing_record(self) -> bool {
        matches!(self, SaveCall::Combined | SaveCall::SigningRecordOnly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tolerance {
    Required,
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveStage {
    pub call: SaveCall,
    pub tolerance: Tolerance,
}

impl SaveStage {
    pub fn required(call: SaveCall) -> Self {
        Self {
            call,
            tolerance: Tolerance::Required,
        }
    }

    pub fn best_effort(call: SaveCall) -> Self {
        Self {
            call,
            tolerance: Tolerance::BestEffort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStrategy {
    pub name: &'static str,
    pub stages: Vec<SaveStage>,
}

/// Outcome of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Strategy that succeeded
    pub strategy: &'static str,
    /// Whether a call that carries the signing record succeeded
    pub signing_record_saved: bool,
    /// Best-effort stages that failed
    pub tolerated: Vec<String>,
}

/// Every strategy failed
#[derive(Debug)]
pub struct SaveFailure {
    pub attempts: Vec<(&'static str, BackendError)>,
}

impl SaveFailure {
    /// The service's text from the last attempt, if it sent any.
    pub fn last_service_message(&self) -> Option<&str> {
        self.attempts
            .last()
            .and_then(|(_, error)| error.service_message())
    }

    pub fn into_error(self) -> MailconfError {
        MailconfError::SaveFailed {
            attempts: self
                .attempts
                .into_iter()
                .map(|(name, error)| format!("{name}: {error}"))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    strategies: Vec<SaveStrategy>,
}

impl SavePlan {
    pub fn new(strategies: Vec<SaveStrategy>) -> Self {
        Self { strategies }
    }

    /// Combined payload first; then profiles only, optionally followed by a
    /// best-effort signing-record call.
    pub fn standard(signing_record_fallback: bool) -> Self {
        let mut fallback = vec![SaveStage::required(SaveCall::ProfilesOnly)];
        if signing_record_fallback {
            fallback.push(SaveStage::best_effort(SaveCall::SigningRecordOnly));
        }
        Self::new(vec![
            SaveStrategy {
                name: "combined",
                stages: vec![SaveStage::required(SaveCall::Combined)],
            },
            SaveStrategy {
                name: "profiles-only",
                stages: fallback,
            },
        ])
    }

    pub fn strategies(&self) -> &[SaveStrategy] {
        &self.strategies
    }

    pub fn execute(
        &self,
        backend: &dyn SettingsBackend,
        payload: &SavePayload,
    ) -> Result<SaveReport, SaveFailure> {
        let mut attempts = Vec::new();

        'strategies: for strategy in &self.strategies {
            let mut signing_record_saved = false;
            let mut tolerated = Vec::new();

            for stage in &strategy.stages {
                match stage.call.invoke(backend, payload) {
                    Ok(()) => {
                        debug!(strategy = strategy.name, call = ?stage.call, "save stage succeeded");
                        signing_record_saved |= stage.call.persists_signing_record();
                    }
                    Err(error) if stage.tolerance == Tolerance::BestEffort => {
                        debug!(strategy = strategy.name, call = ?stage.call, %error, "best-effort save stage failed");
                        tolerated.push(error.to_string());
                    }
                    Err(error) => {
                        warn!(strategy = strategy.name, call = ?stage.call, %error, "save strategy failed");
                        attempts.push((strategy.name, error));
                        continue 'strategies;
                    }
                }
            }

            return Ok(SaveReport {
                strategy: strategy.name,
                signing_record_saved,
                tolerated,
            });
        }

        Err(SaveFailure { attempts })
    }
}
