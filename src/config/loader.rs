//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::ConfigWarning;
use crate::error::{MailconfError, MailconfResult};

use super::types::ControllerConfig;

pub const PROJECT_CONFIG_PATH: &str = ".mailconf/config.toml";
const USER_CONFIG_PATH: &str = "mailconf/config.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> MailconfResult<(ControllerConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ControllerConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MailconfError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> ControllerConfig {
    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG_PATH);
        if project_config.exists() {
            match ControllerConfig::load(&project_config) {
                Ok(config) => return with_env_overrides(config),
                Err(e) => debug!(path = %project_config.display(), error = %e, "ignoring project config"),
            }
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            match ControllerConfig::load(&user_config) {
                Ok(config) => return with_env_overrides(config),
                Err(e) => debug!(path = %user_config.display(), error = %e, "ignoring user config"),
            }
        }
    }

    with_env_overrides(ControllerConfig::default())
}

/// Apply environment variable overrides (MAILCONF_* prefix)
pub fn with_env_overrides(mut config: ControllerConfig) -> ControllerConfig {
    if let Ok(message) = std::env::var("MAILCONF_GENERIC_FAILURE") {
        if !message.trim().is_empty() {
            config.messages.generic_failure = message;
        }
    }

    if let Ok(subject) = std::env::var("MAILCONF_TEST_SUBJECT") {
        config.test_message.subject = subject;
    }

    if let Ok(body) = std::env::var("MAILCONF_TEST_BODY") {
        config.test_message.body = body;
    }

    if let Ok(region) = std::env::var("MAILCONF_BULK_REGION") {
        if !region.trim().is_empty() {
            config.presets.bulk_mail_region = region.trim().to_string();
        }
    }

    if let Ok(val) = std::env::var("MAILCONF_SIGNING_FALLBACK") {
        config.save.signing_record_fallback = val.to_lowercase() != "false" && val != "0";
    }

    config
}

/// `$XDG_CONFIG_HOME/mailconf/config.toml`, else the platform config dir
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join(USER_CONFIG_PATH))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "messages",
        "generic_failure",
        "test_message",
        "subject",
        "body",
        "presets",
        "bulk_mail_region",
        "custom",
        "label",
        "host",
        "port",
        "security",
        "save",
        "signing_record_fallback",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
