//! Controller configuration
//!
//! Lookup order:
//! 1. Explicit path passed by the embedding application
//! 2. Environment variables (MAILCONF_*) applied on top of whatever loaded
//! 3. Project config (.mailconf/config.toml)
//! 4. User config (<config dir>/mailconf/config.toml)
//! 5. Built-in defaults

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;
pub use loader::{user_config_path, with_env_overrides, PROJECT_CONFIG_PATH};
pub use types::{
    ControllerConfig, CustomPresetConfig, MessagesConfig, PresetsConfig, SaveConfig,
    TestMessageConfig,
};
