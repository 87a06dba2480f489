//! Log subscriber setup
//!
//! Filter precedence: explicit argument, `MAILCONF_LOG`, `RUST_LOG`, `info`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MAILCONF_LOG";

/// Build the filter a subscriber would use.
pub fn log_filter(explicit: Option<&str>) -> EnvFilter {
    if let Some(directives) = explicit {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a fmt subscriber. Returns false if one is already installed.
pub fn init_logging(explicit: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(explicit))
        .with_target(false)
        .try_init()
        .is_ok()
}
