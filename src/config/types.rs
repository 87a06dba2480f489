//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::policies::{Preset, PresetCatalog, PresetSecurity, DEFAULT_BULK_MAIL_REGION};
use crate::domain::value_objects::ConfigWarning;
use crate::error::MailconfResult;

use super::loader;

/// Toast texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Shown when a remote call fails without a message of its own
    #[serde(default = "default_generic_failure")]
    pub generic_failure: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            generic_failure: default_generic_failure(),
        }
    }
}

fn default_generic_failure() -> String {
    "Something went wrong. Please try again.".to_string()
}

/// Fixed subject/body of the `send_message` test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMessageConfig {
    #[serde(default = "default_test_subject")]
    pub subject: String,
    #[serde(default = "default_test_body")]
    pub body: String,
}

impl Default for TestMessageConfig {
    fn default() -> Self {
        Self {
            subject: default_test_subject(),
            body: default_test_body(),
        }
    }
}

fn default_test_subject() -> String {
    "Test email".to_string()
}

fn default_test_body() -> String {
    "This is a test message confirming that outgoing email is configured correctly.".to_string()
}

/// A preset defined in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPresetConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub host: String,
    pub port: u32,
    #[serde(default)]
    pub security: PresetSecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Region used when applying the bulk-mail preset
    #[serde(default = "default_bulk_mail_region")]
    pub bulk_mail_region: String,

    #[serde(default)]
    pub custom: BTreeMap<String, CustomPresetConfig>,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            bulk_mail_region: default_bulk_mail_region(),
            custom: BTreeMap::new(),
        }
    }
}

fn default_bulk_mail_region() -> String {
    DEFAULT_BULK_MAIL_REGION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Attempt the signing-record-only call after a profiles-only fallback
    #[serde(default = "default_true")]
    pub signing_record_fallback: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            signing_record_fallback: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ControllerConfig {
    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub test_message: TestMessageConfig,

    #[serde(default)]
    pub presets: PresetsConfig,

    #[serde(default)]
    pub save: SaveConfig,
}

impl ControllerConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> MailconfResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> MailconfResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Built-in presets extended by `[presets.custom.*]`
    pub fn preset_catalog(&self) -> PresetCatalog {
        let custom = self.presets.custom.iter().map(|(key, preset)| {
            Preset::new(
                key.clone(),
                preset.label.clone().unwrap_or_else(|| key.clone()),
                preset.host.clone(),
                preset.port,
                preset.security,
            )
        });
        PresetCatalog::builtin()
            .with_presets(custom)
            .with_bulk_mail_region(self.presets.bulk_mail_region.clone())
    }
}
