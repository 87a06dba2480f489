//! Preset Catalog
//!
//! Provider key → transport defaults (host, port, security). Applying a
//! preset touches only those fields; credentials and the from address stay.
//!
//! The bulk-mail provider encodes its region in the hostname
//! (`email-smtp.<region>.amazonaws.com`), so the region is derived from and
//! written back into the host rather than stored separately.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TransportBlock;

pub const BULK_MAIL_PRESET: &str = "ses";
pub const DEFAULT_BULK_MAIL_REGION: &str = "us-east-1";
const BULK_MAIL_HOST_PREFIX: &str = "email-smtp.";
const BULK_MAIL_HOST_SUFFIX: &str = ".amazonaws.com";

/// Regions offered by the region selector
pub const BULK_MAIL_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ca-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-central-1",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "sa-east-1",
];

/// Transport security a preset selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetSecurity {
    None,
    #[default]
    Tls,
    Ssl,
}

impl PresetSecurity {
    pub fn flags(self) -> (bool, bool) {
        match self {
            PresetSecurity::None => (false, false),
            PresetSecurity::Tls => (true, false),
            PresetSecurity::Ssl => (false, true),
        }
    }

    fn matches(self, transport: &TransportBlock) -> bool {
        self.flags() == (transport.use_tls(), transport.use_ssl())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub key: String,
    pub label: String,
    pub host: String,
    pub port: u32,
    pub security: PresetSecurity,
    /// Host is rebuilt from a region
    pub regional: bool,
}

impl Preset {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        host: impl Into<String>,
        port: u32,
        security: PresetSecurity,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            host: host.into(),
            port,
            security,
            regional: false,
        }
    }

    fn regional(mut self) -> Self {
        self.regional = true;
        self
    }

    /// Overwrite host, port and security flags.
    pub fn apply(&self, transport: &mut TransportBlock, region: &str) {
        transport.host = if self.regional {
            host_for_region(region)
        } else {
            self.host.clone()
        };
        transport.port = Some(self.port);
        let (use_tls, use_ssl) = self.security.flags();
        transport.set_security_mode(use_tls, use_ssl);
    }

    fn matches(&self, transport: &TransportBlock) -> bool {
        let host_matches = if self.regional {
            region_from_host(&transport.host).is_some()
        } else {
            transport.host.trim().eq_ignore_ascii_case(&self.host)
        };
        host_matches && transport.port == Some(self.port) && self.security.matches(transport)
    }
}

/// Lookup table of presets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
    bulk_mail_region: String,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    pub fn builtin() -> Self {
        use PresetSecurity::{Ssl, Tls};
        let presets = vec![
            Preset::new("gmail", "Gmail / Google Workspace", "smtp.gmail.com", 587, Tls),
            Preset::new("outlook", "Microsoft 365 / Outlook", "smtp.office365.com", 587, Tls),
            Preset::new("yahoo", "Yahoo Mail", "smtp.mail.yahoo.com", 465, Ssl),
            Preset::new("zoho", "Zoho Mail", "smtp.zoho.com", 465, Ssl),
            Preset::new("sendgrid", "SendGrid", "smtp.sendgrid.net", 587, Tls),
            Preset::new("mailgun", "Mailgun", "smtp.mailgun.org", 587, Tls),
            Preset::new("postmark", "Postmark", "smtp.postmarkapp.com", 587, Tls),
            Preset::new(
                BULK_MAIL_PRESET,
                "Amazon SES",
                host_for_region(DEFAULT_BULK_MAIL_REGION),
                587,
                Tls,
            )
            .regional(),
        ];
        Self {
            presets,
            bulk_mail_region: DEFAULT_BULK_MAIL_REGION.to_string(),
        }
    }

    /// Add presets; an existing key is replaced.
    pub fn with_presets(mut self, extra: impl IntoIterator<Item = Preset>) -> Self {
        for preset in extra {
            match self.presets.iter_mut().find(|p| p.key == preset.key) {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
        }
        self
    }

    pub fn with_bulk_mail_region(mut self, region: impl Into<String>) -> Self {
        self.bulk_mail_region = region.into();
        self
    }

    pub fn bulk_mail_region(&self) -> &str {
        &self.bulk_mail_region
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        let key = key.trim();
        self.presets.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// The preset whose host, port and security match `transport`.
    pub fn detect(&self, transport: &TransportBlock) -> Option<&Preset> {
        self.presets.iter().find(|p| p.matches(transport))
    }
}

/// Region embedded in a bulk-mail host, if the host has that shape.
pub fn region_from_host(host: &str) -> Option<&str> {
    let region = host
        .trim()
        .strip_prefix(BULK_MAIL_HOST_PREFIX)?
        .strip_suffix(BULK_MAIL_HOST_SUFFIX)?;
    (!region.is_empty() && !region.contains('.')).then_some(region)
}

pub fn host_for_region(region: &str) -> String {
    format!(
        "{}{}{}",
        BULK_MAIL_HOST_PREFIX,
        region.trim(),
        BULK_MAIL_HOST_SUFFIX
    )
}
