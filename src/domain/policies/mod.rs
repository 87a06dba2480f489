//! Domain Policies
//!
//! Business rules and static tables that govern behavior.
//! These are pure functions that operate on domain entities.

mod presets;

pub use presets::{
    host_for_region, region_from_host, Preset, PresetCatalog, PresetSecurity, BULK_MAIL_PRESET,
    BULK_MAIL_REGIONS, DEFAULT_BULK_MAIL_REGION,
};
