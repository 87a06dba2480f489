//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Settings persistence (JSON file)
//! - `notices/` - Notice sinks (NDJSON, log)
//! - `logging` - tracing subscriber setup

pub mod logging;
pub mod notices;
pub mod repositories;

// Re-export for convenience
pub use logging::init_logging;
pub use notices::{JsonNoticeSink, TracingNoticeSink};
pub use repositories::JsonFileSettingsBackend;
