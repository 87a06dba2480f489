//! Write-only secret values
//!
//! The server never echoes a secret back. `SecretField::Unchanged` means "keep
//! whatever the server has"; `SecretField::Edited` carries a value the user typed
//! this session and is the only state that reaches a save payload.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// A credential value that never prints itself and is zeroized on drop
pub struct Secret(SecretString);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Session view of one secret field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SecretField {
    /// Not touched this session; the server keeps its stored value
    #[default]
    Unchanged,
    /// Typed this session; sent on the next save
    Edited(Secret),
}

impl SecretField {
    pub fn edited(value: impl Into<String>) -> Self {
        SecretField::Edited(Secret::new(value))
    }

    /// The edit-flag
    pub fn is_edited(&self) -> bool {
        matches!(self, SecretField::Edited(_))
    }

    /// Edited to an empty or whitespace-only value
    pub fn is_cleared(&self) -> bool {
        matches!(self, SecretField::Edited(secret) if secret.is_blank())
    }

    /// Value to place in an outbound payload
    pub fn outbound(&self) -> Option<String> {
        match self {
            SecretField::Unchanged => None,
            SecretField::Edited(secret) => Some(secret.expose().to_string()),
        }
    }

    /// What an input box shows: blank unless edited
    pub fn display_value(&self) -> &str {
        match self {
            SecretField::Unchanged => "",
            SecretField::Edited(secret) => secret.expose(),
        }
    }
}
