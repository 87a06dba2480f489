//! Repository Implementations
//!
//! Concrete implementations of the settings persistence port.

mod json_settings;

pub use json_settings::JsonFileSettingsBackend;
