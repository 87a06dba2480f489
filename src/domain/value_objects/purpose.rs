//! Purpose value object - names one email profile
//!
//! Each purpose (alerts, invites, password resets, reports) carries its own
//! independently configured profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MailconfError;

/// Usage purpose of an email profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Operational alerts and monitoring notifications
    Alerts,
    /// User invitations
    Invites,
    /// Password reset links
    PasswordResets,
    /// Scheduled reports
    Reports,
}

impl Purpose {
    /// Every purpose, in display order.
    pub const ALL: [Purpose; 4] = [
        Purpose::Alerts,
        Purpose::Invites,
        Purpose::PasswordResets,
        Purpose::Reports,
    ];

    /// Wire/config key for this purpose
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Alerts => "alerts",
            Purpose::Invites => "invites",
            Purpose::PasswordResets => "password_resets",
            Purpose::Reports => "reports",
        }
    }

    /// Human label for panel headings
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Alerts => "Alerts",
            Purpose::Invites => "Invitations",
            Purpose::PasswordResets => "Password resets",
            Purpose::Reports => "Reports",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = MailconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "alerts" => Ok(Purpose::Alerts),
            "invites" => Ok(Purpose::Invites),
            "password_resets" => Ok(Purpose::PasswordResets),
            "reports" => Ok(Purpose::Reports),
            _ => Err(MailconfError::UnknownPurpose {
                value: s.to_string(),
            }),
        }
    }
}
