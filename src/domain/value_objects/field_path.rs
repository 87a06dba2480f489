//! Typed addressing of profile fields
//!
//! UI forms name fields with dotted paths (`transport.host`,
//! `retrieval_primary.port`). These parse into [`FieldPath`] so every deep-set
//! goes through an exhaustively matched type instead of string keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MailconfError;

/// One of the two mutually exclusive retrieval blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalSlot {
    Primary,
    Secondary,
}

impl RetrievalSlot {
    pub const ALL: [RetrievalSlot; 2] = [RetrievalSlot::Primary, RetrievalSlot::Secondary];

    /// The slot this one excludes
    pub fn other(self) -> Self {
        match self {
            RetrievalSlot::Primary => RetrievalSlot::Secondary,
            RetrievalSlot::Secondary => RetrievalSlot::Primary,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RetrievalSlot::Primary => "retrieval_primary",
            RetrievalSlot::Secondary => "retrieval_secondary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RetrievalSlot::Primary => "Primary retrieval",
            RetrievalSlot::Secondary => "Secondary retrieval",
        }
    }
}

/// Transport security flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityFlag {
    Tls,
    Ssl,
}

impl FromStr for SecurityFlag {
    type Err = MailconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tls" | "starttls" => Ok(SecurityFlag::Tls),
            "ssl" => Ok(SecurityFlag::Ssl),
            _ => Err(MailconfError::InvalidFieldPath {
                path: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportField {
    Host,
    Port,
    Username,
    Password,
    FromAddress,
    UseTls,
    UseSsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetrievalField {
    Host,
    Port,
    Username,
    Password,
    UseSecureTransport,
}

/// Path to one settable field of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Enabled,
    Transport(TransportField),
    Retrieval(RetrievalSlot, RetrievalField),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Enabled => write!(f, "enabled"),
            FieldPath::Transport(field) => {
                let name = match field {
                    TransportField::Host => "host",
                    TransportField::Port => "port",
                    TransportField::Username => "username",
                    TransportField::Password => "password",
                    TransportField::FromAddress => "from_address",
                    TransportField::UseTls => "use_tls",
                    TransportField::UseSsl => "use_ssl",
                };
                write!(f, "transport.{}", name)
            }
            FieldPath::Retrieval(slot, field) => {
                let name = match field {
                    RetrievalField::Host => "host",
                    RetrievalField::Port => "port",
                    RetrievalField::Username => "username",
                    RetrievalField::Password => "password",
                    RetrievalField::UseSecureTransport => "use_secure_transport",
                };
                write!(f, "{}.{}", slot.key(), name)
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = MailconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MailconfError::InvalidFieldPath {
            path: s.to_string(),
        };
        let normalized = normalize_segment(s);
        if normalized == "enabled" {
            return Ok(FieldPath::Enabled);
        }

        let (block, field) = normalized.split_once('.').ok_or_else(invalid)?;
        match block {
            "transport" | "smtp" => {
                let field = match field {
                    "host" => TransportField::Host,
                    "port" => TransportField::Port,
                    "username" | "user" => TransportField::Username,
                    "password" => TransportField::Password,
                    "from_address" | "from" => TransportField::FromAddress,
                    "use_tls" => TransportField::UseTls,
                    "use_ssl" => TransportField::UseSsl,
                    _ => return Err(invalid()),
                };
                Ok(FieldPath::Transport(field))
            }
            "retrieval_primary" | "retrieval_secondary" => {
                let slot = if block == "retrieval_primary" {
                    RetrievalSlot::Primary
                } else {
                    RetrievalSlot::Secondary
                };
                let field = match field {
                    "host" => RetrievalField::Host,
                    "port" => RetrievalField::Port,
                    "username" | "user" => RetrievalField::Username,
                    "password" => RetrievalField::Password,
                    "use_secure_transport" | "secure" => RetrievalField::UseSecureTransport,
                    _ => return Err(invalid()),
                };
                Ok(FieldPath::Retrieval(slot, field))
            }
            _ => Err(invalid()),
        }
    }
}

// Accepts camelCase segments (`retrievalPrimary.fromAddress`) as well.
fn normalize_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for ch in s.trim().chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('.') && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    // `useTLS` becomes `use_t_l_s`; fold acronyms back.
    out.replace("t_l_s", "tls").replace("s_s_l", "ssl")
}

/// Value written by `set_field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Port(Option<u32>),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Interpret as a port. Blank text is "absent".
    pub fn as_port(&self, path: &FieldPath) -> Result<Option<u32>, MailconfError> {
        match self {
            FieldValue::Port(port) => Ok(*port),
            FieldValue::Text(text) if text.trim().is_empty() => Ok(None),
            FieldValue::Text(text) => {
                text.trim()
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| MailconfError::FieldTypeMismatch {
                        path: path.to_string(),
                        expected: "a port number",
                    })
            }
            FieldValue::Flag(_) => Err(MailconfError::FieldTypeMismatch {
                path: path.to_string(),
                expected: "a port number",
            }),
        }
    }

    pub fn as_text(&self, path: &FieldPath) -> Result<String, MailconfError> {
        match self {
            FieldValue::Text(text) => Ok(text.clone()),
            FieldValue::Port(Some(port)) => Ok(port.to_string()),
            _ => Err(MailconfError::FieldTypeMismatch {
                path: path.to_string(),
                expected: "text",
            }),
        }
    }

    pub fn as_flag(&self, path: &FieldPath) -> Result<bool, MailconfError> {
        match self {
            FieldValue::Flag(flag) => Ok(*flag),
            FieldValue::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "on" | "1" | "yes" => Ok(true),
                "false" | "off" | "0" | "no" | "" => Ok(false),
                _ => Err(MailconfError::FieldTypeMismatch {
                    path: path.to_string(),
                    expected: "a boolean",
                }),
            },
            FieldValue::Port(_) => Err(MailconfError::FieldTypeMismatch {
                path: path.to_string(),
                expected: "a boolean",
            }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Port(Some(value))
    }
}

/// Editable fields of the signing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningField {
    Domain,
    Selector,
    PublicKey,
}
